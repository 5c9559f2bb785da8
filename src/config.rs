//! Tunables for one controllable actor, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ActorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Ground speed in units per second at multiplier 1.0.
    pub ground_speed: f32,
    /// Speed multiplier applied while inside a flow zone.
    pub flow_zone_speed_multiplier: f32,
    /// Vertical coordinate the actor snaps to when it lands.
    pub ground_height: f32,
    /// Fixed physics step in seconds.
    pub fixed_timestep: f32,
    /// Enables development-only commands such as collision restore.
    pub debug_tools: bool,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            ground_speed: 6.0,
            flow_zone_speed_multiplier: 0.35,
            ground_height: 0.0,
            fixed_timestep: 1.0 / 60.0,
            debug_tools: cfg!(debug_assertions),
        }
    }
}

impl ActorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_timestep > 0.0) {
            return Err(ActorError::InvalidConfig {
                field: "fixed_timestep",
                reason: format!("must be positive, got {}", self.fixed_timestep),
            });
        }
        if !(self.ground_speed >= 0.0) {
            return Err(ActorError::InvalidConfig {
                field: "ground_speed",
                reason: format!("must not be negative, got {}", self.ground_speed),
            });
        }
        let mult = self.flow_zone_speed_multiplier;
        if !(mult > 0.0 && mult <= 1.0) {
            return Err(ActorError::InvalidConfig {
                field: "flow_zone_speed_multiplier",
                reason: format!("must be in (0, 1], got {}", mult),
            });
        }
        Ok(())
    }
}
