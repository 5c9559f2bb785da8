use glam::Vec3;
use tracing::{trace, warn};

use crate::components::{
    GroundMovement, Holder, KillCause, LocalTransform, PickEvent, PickMeFx, PickableState,
    PlayerState, Respawner,
};
use crate::config::ActorConfig;
use crate::engine::input::{SharedInput, Signals};
use crate::error::Result;
use crate::fsm::{self, Machine, StateHooks, StateMachine, StateTable};

use super::lifecycle::{DeathEvent, LifeCycleGate, SubscriptionId};

/// FSM driving the player.
pub type PlayerFsm = StateMachine<Player>;

/// One controllable actor and the collaborators it drives.
///
/// Pickup notifications arrive through the subscribed [`PickableState`] and
/// are applied by [`Player::dispatch_pickup_events`], or directly through
/// [`Player::on_picked`], [`Player::on_thrown`] and [`Player::on_hit`].
pub struct Player {
    name: String,
    player_index: usize,
    config: ActorConfig,
    fsm: PlayerFsm,
    input: Option<SharedInput>,
    lifecycle: LifeCycleGate,
    restore_collisions_requested: bool,
    pub transform: LocalTransform,
    pub pickable: PickableState,
    pub holder: Holder,
    pub movement: GroundMovement,
    pub respawner: Respawner,
    pub pick_me_fx: PickMeFx,
}

fn state_table() -> StateTable<PlayerState, Player> {
    StateTable::new()
        .with(
            PlayerState::Idle,
            StateHooks::new().on_enter(idle_enter).on_update(idle_update),
        )
        .with(
            PlayerState::Running,
            StateHooks::new()
                .on_enter(running_enter)
                .on_update(running_update)
                .on_physics_update(running_physics_update)
                .on_exit(running_exit),
        )
        .with(
            PlayerState::Flying,
            StateHooks::new().on_update(flying_update),
        )
        .with(
            PlayerState::Captured,
            StateHooks::new()
                .on_enter(captured_enter)
                .on_update(captured_update),
        )
}

impl Player {
    /// Build the actor, subscribe to its pickup events and enter Idle.
    pub fn new(name: impl Into<String>, player_index: usize, config: ActorConfig) -> Self {
        let mut player = Self {
            name: name.into(),
            player_index,
            movement: GroundMovement::new(config.ground_speed),
            config,
            fsm: StateMachine::new(PlayerState::Idle, state_table()),
            input: None,
            lifecycle: LifeCycleGate::new(),
            restore_collisions_requested: false,
            transform: LocalTransform::new(Vec3::ZERO),
            pickable: PickableState::new(),
            holder: Holder::new(),
            respawner: Respawner::new(),
            pick_me_fx: PickMeFx::new(),
        };
        player.pickable.subscribe();
        fsm::start(&mut player);
        player
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    pub fn state(&self) -> PlayerState {
        self.fsm.state()
    }

    // -----------------------------------------------------------------------
    // Input binding
    // -----------------------------------------------------------------------

    pub fn bind_input(&mut self, input: SharedInput) {
        self.input = Some(input);
    }

    /// A device joined with `index`; bind it if it is ours.
    pub fn on_input_joined(&mut self, index: usize, input: SharedInput) -> bool {
        if index != self.player_index {
            return false;
        }
        self.bind_input(input);
        true
    }

    pub fn unbind_input(&mut self) -> Option<SharedInput> {
        self.input.take()
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// This frame's signals, or `None` while no device is bound.
    pub fn signals(&self) -> Option<Signals> {
        self.input.as_ref().map(|input| Signals::read(&input.borrow()))
    }

    // -----------------------------------------------------------------------
    // Frame driving
    // -----------------------------------------------------------------------

    /// Run one frame with `physics_steps` fixed steps.
    pub fn frame(&mut self, dt: f32, physics_steps: u32) {
        fsm::frame(self, dt, physics_steps);
    }

    /// Apply queued pickup notifications in arrival order.
    pub fn dispatch_pickup_events(&mut self) -> usize {
        let events = self.pickable.drain_events();
        let count = events.len();
        for event in events {
            match event {
                PickEvent::Picked => self.on_picked(),
                PickEvent::Thrown => self.on_thrown(),
                PickEvent::Hit { .. } => self.on_hit(),
            }
        }
        count
    }

    pub fn on_picked(&mut self) {
        fsm::set_state(self, PlayerState::Captured);
    }

    pub fn on_thrown(&mut self) {
        fsm::set_state(self, PlayerState::Flying);
    }

    pub fn on_hit(&mut self) {
        self.land();
    }

    /// Back to Idle on the ground plane.
    pub fn land(&mut self) {
        fsm::set_state(self, PlayerState::Idle);
        self.transform.position.y = self.config.ground_height;
    }

    pub fn on_collider_enter(&self, kind: &str) {
        warn!(actor = %self.name, kind, "collider enter");
    }

    pub fn take_collision_restore_request(&mut self) -> bool {
        std::mem::take(&mut self.restore_collisions_requested)
    }

    /// Stop listening for pickup events. The actor keeps its last state.
    pub fn teardown(&mut self) {
        self.pickable.unsubscribe();
        self.input = None;
    }

    // -----------------------------------------------------------------------
    // Life cycle
    // -----------------------------------------------------------------------

    /// Report this actor's death. Ignored while a respawn is already pending.
    /// Leaves the FSM state untouched; the host resets it once respawn ends.
    pub fn kill_by(&mut self, cause: KillCause) -> bool {
        self.lifecycle
            .kill(&self.name, cause, &mut self.holder, &mut self.respawner)
    }

    /// Like [`Player::kill_by`] for callers holding a raw cause code.
    pub fn kill_by_code(&mut self, code: u8) -> Result<bool> {
        let cause = KillCause::try_from(code)?;
        Ok(self.kill_by(cause))
    }

    pub fn on_death(&mut self, listener: impl FnMut(&DeathEvent) + 'static) -> SubscriptionId {
        self.lifecycle.deaths.subscribe(listener)
    }

    pub fn remove_death_listener(&mut self, id: SubscriptionId) -> bool {
        self.lifecycle.deaths.unsubscribe(id)
    }

    pub fn last_kill_cause(&self) -> Option<KillCause> {
        self.lifecycle.last_cause()
    }

    /// Finish the respawn cycle: back to Idle at `spawn`.
    pub fn reset_after_respawn(&mut self, spawn: Vec3) {
        self.respawner.complete();
        self.transform = LocalTransform::new(spawn);
        self.movement.stop();
        fsm::set_state(self, PlayerState::Idle);
    }

    fn update_pick_block(&mut self, signals: &Signals) {
        if !self.holder.is_busy() {
            self.pickable.set_pick_blocked(!signals.pick_held);
        }
    }
}

impl Machine for Player {
    type State = PlayerState;

    fn fsm(&self) -> &PlayerFsm {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut PlayerFsm {
        &mut self.fsm
    }

    fn early_global_update(&mut self) {
        let Some(signals) = self.signals() else {
            return;
        };

        if signals.throw_pressed {
            let thrown = self.holder.throw();
            trace!(actor = %self.name, ?thrown, "throw requested");
        }

        if self.config.debug_tools && signals.restore_collisions_pressed {
            self.restore_collisions_requested = true;
        }
    }

    fn late_global_update(&mut self) {
        let show = !self.pickable.is_pick_blocked();
        if show != self.pick_me_fx.is_active() {
            trace!(actor = %self.name, show, "pick-me indicator");
        }
        self.pick_me_fx.set_active(show);
    }
}

// ---------------------------------------------------------------------------
// Idle
// ---------------------------------------------------------------------------

fn idle_enter(p: &mut Player) {
    p.pickable.set_idle();
    p.holder.set_unavailable(false);
}

fn idle_update(p: &mut Player) {
    let Some(signals) = p.signals() else {
        return;
    };
    p.update_pick_block(&signals);
    if signals.has_direction() {
        fsm::set_state(p, PlayerState::Running);
    }
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

fn running_enter(p: &mut Player) {
    p.movement.set_trail(true);
}

fn running_update(p: &mut Player) {
    let Some(signals) = p.signals() else {
        return;
    };
    p.update_pick_block(&signals);
}

fn running_physics_update(p: &mut Player) {
    // An unbound device reads as no movement intent.
    let direction = p.signals().map_or(Vec3::ZERO, |s| s.direction);
    if direction != Vec3::ZERO {
        let multiplier = if p.movement.is_inside_flow_zone() {
            p.config.flow_zone_speed_multiplier
        } else {
            1.0
        };
        let dt = p.config.fixed_timestep;
        p.movement
            .move_actor(&mut p.transform, direction, multiplier, dt);
    } else {
        p.movement.stop();
        fsm::set_state(p, PlayerState::Idle);
    }
}

fn running_exit(p: &mut Player) {
    p.movement.set_trail(false);
}

// ---------------------------------------------------------------------------
// Flying / Captured
// ---------------------------------------------------------------------------

fn flying_update(p: &mut Player) {
    let Some(signals) = p.signals() else {
        return;
    };
    if signals.throw_pressed {
        p.land();
    }
}

fn captured_enter(p: &mut Player) {
    p.movement.leave_flow_zone();
    p.holder.set_unavailable(true);
    p.pickable.set_pick_blocked(true);
}

fn captured_update(p: &mut Player) {
    let Some(signals) = p.signals() else {
        return;
    };
    if signals.throw_pressed {
        p.pickable.request_release();
        fsm::set_state(p, PlayerState::Idle);
    }
}
