//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring tour progress
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Encoding a progress record failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding a stored progress record failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The record does not describe a reachable state of the tour
    #[error("Progress record validation failed: {0}")]
    ValidationFailed(String),

    /// The backing store could not be read or written
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
