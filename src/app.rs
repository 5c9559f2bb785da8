use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::{LocalTransform, PickEvent, PlayerState};
use crate::config::ActorConfig;
use crate::engine::input::{shared_input, SharedInput};
use crate::engine::time::FixedStep;
use crate::error::Result;
use crate::scene::test_scene::{load_test_scene, nearest_pickable, PLAYER_SPAWN};
use crate::systems::{ignore_collision, restore_collisions, Player};

/// What happened during one [`DemoApp::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub state: PlayerState,
    pub physics_steps: u32,
    /// Fraction of the next physics step already accumulated.
    pub alpha: f32,
    pub position: Vec3,
    pub input_events: usize,
    pub pickup_events: usize,
    pub collisions_restored: usize,
}

/// Headless host: owns the scene, one player, its input device, and the
/// fixed-step clock, and drives them in the engine's frame order.
pub struct DemoApp {
    world: World,
    player: Player,
    player_entity: Entity,
    bombs: Vec<Entity>,
    input: SharedInput,
    clock: FixedStep,
    frame: u64,
}

impl DemoApp {
    pub fn new(config: ActorConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::new();
        let scene = load_test_scene(&mut world);
        let clock = FixedStep::new(config.fixed_timestep);

        let mut player = Player::new("player-0", 0, config);
        player.transform = LocalTransform::new(PLAYER_SPAWN);
        let input = shared_input();
        player.on_input_joined(0, input.clone());

        Ok(Self {
            world,
            player,
            player_entity: scene.player,
            bombs: scene.bombs,
            input,
            clock,
            frame: 0,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn player_entity(&self) -> Entity {
        self.player_entity
    }

    pub fn bombs(&self) -> &[Entity] {
        &self.bombs
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn input(&self) -> &SharedInput {
        &self.input
    }

    /// Another holder's pickup subsystem reports an event for our player.
    pub fn notify_pickup(&mut self, event: PickEvent) -> bool {
        self.player.pickable.notify(event)
    }

    /// Have the player's holder grab the closest bomb.
    pub fn grab_nearest(&mut self) -> Option<Entity> {
        let bomb = nearest_pickable(&self.world, self.player.transform.position)?;
        self.player.holder.grab(bomb).then_some(bomb)
    }

    /// Run one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        // Events that arrived between frames settle before dispatch.
        let pickup_events = self.player.dispatch_pickup_events();

        let physics_steps = self.clock.advance(dt);
        self.player.frame(dt, physics_steps);

        if let Some(thrown) = self.player.holder.take_thrown() {
            ignore_collision(&mut self.world, self.player_entity, thrown);
            debug!(?thrown, "thrown bomb ignores thrower");
        }

        let collisions_restored = if self.player.take_collision_restore_request() {
            restore_collisions(&mut self.world, self.player_entity)
        } else {
            0
        };

        if let Ok(mut transform) = self.world.get::<&mut LocalTransform>(self.player_entity) {
            *transform = self.player.transform;
        }

        let input_events = {
            let mut input = self.input.borrow_mut();
            let count = input.events().len();
            input.end_frame();
            count
        };
        self.frame += 1;

        FrameReport {
            frame: self.frame,
            state: self.player.state(),
            physics_steps,
            alpha: self.clock.alpha(),
            position: self.player.transform.position,
            input_events,
            pickup_events,
            collisions_restored,
        }
    }

    /// End the respawn cycle and put the player back at its spawn point.
    pub fn complete_respawn(&mut self) {
        self.player.reset_after_respawn(PLAYER_SPAWN);
    }
}
