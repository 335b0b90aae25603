//! Error types for configuration, dungeon construction and event delivery.
//!
//! Gameplay rules (locked doors, missing transition targets, dead entities)
//! are plain state checks and never surface here.

use thiserror::Error;

use crate::room::RoomId;

/// Errors that can occur when loading or validating balance data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("Failed to parse balance config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but breaks an invariant.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Errors raised while assembling a dungeon session.
#[derive(Debug, Error)]
pub enum DungeonError {
    /// The requested start room is not in the repository.
    #[error("Room {0} does not exist")]
    MissingRoom(RoomId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Returned by an observer that could not handle an event.
#[derive(Debug, Error)]
#[error("Observer failed: {0}")]
pub struct ObserverError(pub String);

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
