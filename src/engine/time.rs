/// Most physics steps one frame may run. Longer frames drop the excess time.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Fixed-timestep accumulator. Frame time goes in, a count of physics steps
/// to run this frame comes out; the remainder carries to the next frame.
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// A non-positive step never runs physics; non-finite or negative frame
    /// times add nothing.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(self.step > 0.0) || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        let cap = self.step * MAX_STEPS_PER_FRAME as f32;
        self.accumulator = (self.accumulator + dt).min(cap);

        let mut steps = 0;
        while steps < MAX_STEPS_PER_FRAME && self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// How far into the next step the accumulator is, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        if self.step > 0.0 {
            self.accumulator / self.step
        } else {
            0.0
        }
    }
}
