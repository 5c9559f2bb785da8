//! Player controller core: a hook-table state machine driving one actor
//! through Idle, Running, Flying and Captured, plus its kill/respawn gate.

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod scene;
pub mod systems;

pub use components::{KillCause, PlayerState};
pub use config::ActorConfig;
pub use error::{ActorError, Result};
pub use systems::Player;
