//! Checkpoint error types.

use crate::core::State;
use thiserror::Error;

/// Errors that can occur while encoding or restoring runtime state
#[derive(Debug, Error)]
pub enum CheckpointError<S: State> {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The payload is malformed or misses a required field
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The payload names a state the configuration does not know
    #[error("unknown state {state:?} encountered during restore")]
    UnknownState { state: S },

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Payload is well-formed but inconsistent with the machine
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
