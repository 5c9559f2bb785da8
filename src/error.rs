//! Error types for the actor controller

use thiserror::Error;

/// The main error type for controller operations
#[derive(Debug, Error)]
pub enum ActorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown kill cause: {0}")]
    UnknownKillCause(String),
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, ActorError>;

impl From<toml::de::Error> for ActorError {
    fn from(err: toml::de::Error) -> Self {
        ActorError::TomlParseError(err.to_string())
    }
}
