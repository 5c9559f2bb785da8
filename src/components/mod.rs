mod character;
mod physics;
mod render;

pub use character::{Holder, PickEvent, PickStatus, PickableState, PlayerState};
pub use physics::GroundMovement;
pub use render::PickMeFx;

use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};
use hecs::Entity;

use crate::error::ActorError;

/// Spatial transform with position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Marker: scene object the holder can pick up and throw.
pub struct Pickable;

/// Entities this object currently does not collide with.
pub struct IgnoreCollision(pub Vec<Entity>);

/// Why an actor died. Diagnostic only: every cause is handled the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KillCause {
    EnvironmentalHazard,
    Pitfall,
    Projectile,
    FriendlyFire,
}

impl KillCause {
    pub const ALL: [KillCause; 4] = [
        KillCause::EnvironmentalHazard,
        KillCause::Pitfall,
        KillCause::Projectile,
        KillCause::FriendlyFire,
    ];

    pub fn code(self) -> u8 {
        match self {
            KillCause::EnvironmentalHazard => 0,
            KillCause::Pitfall => 1,
            KillCause::Projectile => 2,
            KillCause::FriendlyFire => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KillCause::EnvironmentalHazard => "environmental_hazard",
            KillCause::Pitfall => "pitfall",
            KillCause::Projectile => "projectile",
            KillCause::FriendlyFire => "friendly_fire",
        }
    }
}

impl fmt::Display for KillCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for KillCause {
    type Error = ActorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        KillCause::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ActorError::UnknownKillCause(code.to_string()))
    }
}

impl FromStr for KillCause {
    type Err = ActorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KillCause::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ActorError::UnknownKillCause(s.to_string()))
    }
}

/// Respawn bookkeeping. A cycle runs from [`Respawner::register`] until the
/// host calls [`Respawner::complete`].
#[derive(Debug, Default)]
pub struct Respawner {
    respawning: bool,
    registrations: u32,
}

impl Respawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_respawning(&self) -> bool {
        self.respawning
    }

    pub fn register(&mut self) {
        self.respawning = true;
        self.registrations += 1;
    }

    pub fn complete(&mut self) {
        self.respawning = false;
    }

    pub fn registrations(&self) -> u32 {
        self.registrations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_cause_codes_round_trip() {
        for cause in KillCause::ALL {
            assert_eq!(KillCause::try_from(cause.code()).unwrap(), cause);
            assert_eq!(cause.to_string().parse::<KillCause>().unwrap(), cause);
        }
    }

    #[test]
    fn unknown_kill_cause_is_an_error() {
        assert!(matches!(
            KillCause::try_from(9),
            Err(ActorError::UnknownKillCause(code)) if code == "9"
        ));
        assert!("lava".parse::<KillCause>().is_err());
    }

    #[test]
    fn respawner_cycle() {
        let mut respawner = Respawner::new();
        assert!(!respawner.is_respawning());
        respawner.register();
        assert!(respawner.is_respawning());
        respawner.complete();
        assert!(!respawner.is_respawning());
        assert_eq!(respawner.registrations(), 1);
    }
}
