use hecs::Entity;
use tracing::trace;

/// All discrete states the player can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Standing still, available to be picked.
    Idle,
    /// Moving on the ground with the trail effect on.
    Running,
    /// Thrown by another holder, airborne until landing.
    Flying,
    /// Carried by another holder.
    Captured,
}

/// Event flags written by the pickup subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStatus {
    Idle,
    Picked,
    Thrown,
}

/// Notifications the pickup subsystem delivers to the carried actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickEvent {
    Picked,
    Thrown,
    /// Collided with `other` while carried or in flight.
    Hit { other: Entity },
}

/// The actor's side of being picked up.
///
/// The actor owns the intent flags (`pick_blocked`, release requests); the
/// pickup subsystem owns `status` and delivers [`PickEvent`]s through
/// [`PickableState::notify`]. Events queue only while someone is subscribed.
#[derive(Debug)]
pub struct PickableState {
    status: PickStatus,
    pick_blocked: bool,
    release_requests: u32,
    events: Vec<PickEvent>,
    subscribed: bool,
}

impl PickableState {
    pub fn new() -> Self {
        Self {
            status: PickStatus::Idle,
            pick_blocked: false,
            release_requests: 0,
            events: Vec::new(),
            subscribed: false,
        }
    }

    pub fn status(&self) -> PickStatus {
        self.status
    }

    pub fn set_idle(&mut self) {
        self.status = PickStatus::Idle;
    }

    pub fn is_pick_blocked(&self) -> bool {
        self.pick_blocked
    }

    pub fn set_pick_blocked(&mut self, blocked: bool) {
        self.pick_blocked = blocked;
    }

    /// Ask whoever is carrying us to let go.
    pub fn request_release(&mut self) {
        self.release_requests += 1;
    }

    pub fn release_requests(&self) -> u32 {
        self.release_requests
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Stop listening. Anything still queued is discarded.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.events.clear();
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Called by the pickup subsystem. Returns whether the event was queued.
    pub fn notify(&mut self, event: PickEvent) -> bool {
        match event {
            PickEvent::Picked => self.status = PickStatus::Picked,
            PickEvent::Thrown => self.status = PickStatus::Thrown,
            PickEvent::Hit { .. } => {}
        }
        if !self.subscribed {
            trace!(?event, "pickup event dropped, no subscriber");
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn drain_events(&mut self) -> Vec<PickEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for PickableState {
    fn default() -> Self {
        Self::new()
    }
}

/// The actor's own pickup hand: carries and throws scene objects.
#[derive(Debug, Default)]
pub struct Holder {
    held: Option<Entity>,
    thrown: Option<Entity>,
    unavailable: bool,
    throw_requests: u32,
    deaths: u32,
}

impl Holder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start carrying `entity`. Refused while unavailable or already busy.
    pub fn grab(&mut self, entity: Entity) -> bool {
        if self.unavailable || self.held.is_some() {
            return false;
        }
        self.held = Some(entity);
        true
    }

    /// Throw whatever is carried. Returns the thrown entity, if any.
    pub fn throw(&mut self) -> Option<Entity> {
        self.throw_requests += 1;
        let thrown = self.held.take();
        if thrown.is_some() {
            self.thrown = thrown;
        }
        thrown
    }

    /// The most recently thrown entity, cleared on read.
    pub fn take_thrown(&mut self) -> Option<Entity> {
        self.thrown.take()
    }

    pub fn is_busy(&self) -> bool {
        self.held.is_some()
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// The owning actor died: drop anything carried.
    pub fn on_holder_died(&mut self) -> Option<Entity> {
        self.deaths += 1;
        self.held.take()
    }

    pub fn throw_requests(&self) -> u32 {
        self.throw_requests
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}
