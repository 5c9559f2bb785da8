use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{LocalTransform, Pickable};

pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

/// Entities the demo scene hands back to the host.
pub struct TestScene {
    pub player: Entity,
    pub bombs: Vec<Entity>,
}

/// Spawn the actor's scene proxy and a handful of pickable bombs.
pub fn load_test_scene(world: &mut World) -> TestScene {
    let player = world.spawn((LocalTransform::new(PLAYER_SPAWN),));

    let bombs = [(2.0_f32, -1.0_f32), (-3.0, 2.0), (4.0, 4.0)]
        .into_iter()
        .map(|(x, z)| world.spawn((Pickable, LocalTransform::new(Vec3::new(x, 0.0, z)))))
        .collect();

    TestScene { player, bombs }
}

/// The pickable closest to `position`, if any.
pub fn nearest_pickable(world: &World, position: Vec3) -> Option<Entity> {
    world
        .query::<(&Pickable, &LocalTransform)>()
        .iter()
        .map(|(e, (_, t))| (e, t.position.distance_squared(position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
}
