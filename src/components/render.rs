/// The "come pick me" visual indicator above the actor.
#[derive(Debug, Default)]
pub struct PickMeFx {
    active: bool,
    toggles: u32,
}

impl PickMeFx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only a real change counts as a toggle.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.toggles += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}
