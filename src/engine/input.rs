use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec3;

/// Logical buttons an input device exposes to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Throw,
    PickMe,
    /// Development aid: re-enable collisions with pickable objects.
    RestoreCollisions,
}

/// Raw device events, applied in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonPressed(Button),
    ButtonReleased(Button),
    Direction(Vec3),
}

/// Per-device input state owned by the input collaborator.
///
/// Held buttons persist across frames; press edges last until
/// [`InputState::end_frame`], so an edge is visible for exactly one frame.
pub struct InputState {
    held: HashSet<Button>,
    pressed: HashSet<Button>,
    direction: Vec3,
    events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            direction: Vec3::ZERO,
            events: Vec::new(),
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::ButtonPressed(b) => {
                // Key repeat does not produce a second edge.
                if self.held.insert(b) {
                    self.pressed.insert(b);
                }
            }
            InputEvent::ButtonReleased(b) => {
                self.held.remove(&b);
            }
            InputEvent::Direction(d) => self.direction = d,
        }
        self.events.push(event);
    }

    pub fn press(&mut self, button: Button) {
        self.apply(InputEvent::ButtonPressed(button));
    }

    pub fn release(&mut self, button: Button) {
        self.apply(InputEvent::ButtonReleased(button));
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.apply(InputEvent::Direction(direction));
    }

    /// Clear this frame's edges and event log. Call once after the frame.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.events.clear();
    }

    /// Raw events applied since the last [`InputState::end_frame`].
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle the host shares with the actor it binds the device to.
pub type SharedInput = Rc<RefCell<InputState>>;

pub fn shared_input() -> SharedInput {
    Rc::new(RefCell::new(InputState::new()))
}

/// The read-only view the state graph consumes each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    /// Zero means no movement intent.
    pub direction: Vec3,
    pub throw_pressed: bool,
    pub pick_held: bool,
    pub restore_collisions_pressed: bool,
}

impl Signals {
    pub fn read(input: &InputState) -> Self {
        Self {
            direction: input.direction(),
            throw_pressed: input.was_pressed(Button::Throw),
            pick_held: input.is_held(Button::PickMe),
            restore_collisions_pressed: input.was_pressed(Button::RestoreCollisions),
        }
    }

    pub fn has_direction(&self) -> bool {
        self.direction != Vec3::ZERO
    }
}
