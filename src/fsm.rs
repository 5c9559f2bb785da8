use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

/// A hook bound to one state's lifecycle slot. Plain fn pointers so the table
/// can be copied out of the host before the hook borrows the host mutably.
pub type Hook<H> = fn(&mut H);

/// The four optional hooks a state may register. A state with no hooks at all
/// is legal and simply does nothing while current.
pub struct StateHooks<H> {
    pub enter: Option<Hook<H>>,
    pub update: Option<Hook<H>>,
    pub physics_update: Option<Hook<H>>,
    pub exit: Option<Hook<H>>,
}

impl<H> StateHooks<H> {
    pub fn new() -> Self {
        Self {
            enter: None,
            update: None,
            physics_update: None,
            exit: None,
        }
    }

    pub fn on_enter(mut self, hook: Hook<H>) -> Self {
        self.enter = Some(hook);
        self
    }

    pub fn on_update(mut self, hook: Hook<H>) -> Self {
        self.update = Some(hook);
        self
    }

    pub fn on_physics_update(mut self, hook: Hook<H>) -> Self {
        self.physics_update = Some(hook);
        self
    }

    pub fn on_exit(mut self, hook: Hook<H>) -> Self {
        self.exit = Some(hook);
        self
    }
}

impl<H> Default for StateHooks<H> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: fn pointers are Copy regardless of `H`.
impl<H> Clone for StateHooks<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for StateHooks<H> {}

/// Explicit state → hooks lookup table.
pub struct StateTable<S, H> {
    hooks: HashMap<S, StateHooks<H>>,
}

impl<S: Copy + Eq + Hash, H> StateTable<S, H> {
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register the hook set for `state`, replacing any earlier registration.
    pub fn with(mut self, state: S, hooks: StateHooks<H>) -> Self {
        self.hooks.insert(state, hooks);
        self
    }

    /// Hooks for `state`, or an empty set when nothing was registered.
    pub fn get(&self, state: S) -> StateHooks<H> {
        self.hooks.get(&state).copied().unwrap_or_default()
    }

    pub fn is_registered(&self, state: S) -> bool {
        self.hooks.contains_key(&state)
    }
}

impl<S: Copy + Eq + Hash, H> Default for StateTable<S, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented by anything that owns a [`StateMachine`] and wants it driven
/// by [`frame`]. The two global hooks bracket per-state dispatch every frame.
pub trait Machine: Sized {
    type State: Copy + Eq + Hash + Debug;

    fn fsm(&self) -> &StateMachine<Self>;
    fn fsm_mut(&mut self) -> &mut StateMachine<Self>;

    /// Runs first every frame, before the current state's update hook.
    fn early_global_update(&mut self) {}

    /// Runs last every frame, after update and any physics steps.
    fn late_global_update(&mut self) {}
}

/// Finite-state-machine container.
///
/// Tracks the current state, the previous state, and how long the machine has
/// been in its current state. Hooks live in the [`StateTable`]; transitions are
/// applied synchronously through [`set_state`], never deferred.
pub struct StateMachine<H: Machine> {
    state: H::State,
    previous: H::State,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    elapsed: f32,
    started: bool,
    table: StateTable<H::State, H>,
}

impl<H: Machine> StateMachine<H> {
    /// Create a machine sitting in `initial`. Its enter hook runs on [`start`].
    pub fn new(initial: H::State, table: StateTable<H::State, H>) -> Self {
        Self {
            state: initial,
            previous: initial,
            elapsed: 0.0,
            started: false,
            table,
        }
    }

    pub fn state(&self) -> H::State {
        self.state
    }

    pub fn previous(&self) -> H::State {
        self.previous
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn hooks(&self, state: H::State) -> StateHooks<H> {
        self.table.get(state)
    }

    fn swap(&mut self, next: H::State) {
        self.previous = std::mem::replace(&mut self.state, next);
        self.elapsed = 0.0;
    }
}

/// Run the initial state's enter hook. Later calls do nothing.
pub fn start<H: Machine>(host: &mut H) {
    if host.fsm().started {
        return;
    }
    host.fsm_mut().started = true;
    let state = host.fsm().state;
    if let Some(enter) = host.fsm().hooks(state).enter {
        enter(host);
    }
}

/// Assign a new current state.
///
/// Assigning the current state is a no-op. Otherwise the outgoing state's exit
/// hook runs to completion, the value is swapped, then the incoming state's
/// enter hook runs. Returns whether a transition happened.
pub fn set_state<H: Machine>(host: &mut H, next: H::State) -> bool {
    let current = host.fsm().state;
    if current == next {
        return false;
    }

    if let Some(exit) = host.fsm().hooks(current).exit {
        exit(host);
    }
    host.fsm_mut().swap(next);
    debug!(from = ?current, to = ?next, "state transition");
    if let Some(enter) = host.fsm().hooks(next).enter {
        enter(host);
    }
    true
}

/// Dispatch the current state's update hook.
pub fn update<H: Machine>(host: &mut H) {
    let state = host.fsm().state;
    if let Some(update) = host.fsm().hooks(state).update {
        update(host);
    }
}

/// Dispatch the current state's physics hook once.
pub fn physics_update<H: Machine>(host: &mut H) {
    let state = host.fsm().state;
    if let Some(physics) = host.fsm().hooks(state).physics_update {
        physics(host);
    }
}

/// Drive one frame: global-early, state update, `physics_steps` physics
/// updates (each re-reads the current state), global-late. Then advance the
/// time-in-state clock by `dt`.
pub fn frame<H: Machine>(host: &mut H, dt: f32, physics_steps: u32) {
    host.early_global_update();
    update(host);
    for _ in 0..physics_steps {
        physics_update(host);
    }
    host.late_global_update();
    host.fsm_mut().elapsed += dt;
}
