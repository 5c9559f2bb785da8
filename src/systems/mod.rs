mod collision;
mod lifecycle;
mod player;

pub use collision::{collides_with, ignore_collision, restore_collisions};
pub use lifecycle::{DeathChannel, DeathEvent, LifeCycleGate, SubscriptionId};
pub use player::{Player, PlayerFsm};
