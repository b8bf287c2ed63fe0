//! Error types for the Perfume actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PerfumeError {
    #[error("Perfume not found: {0}")]
    NotFound(String),

    /// Malformed input, or an attempt to change a finished perfume.
    #[error("Perfume validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PerfumeError {
    fn from(msg: String) -> Self {
        PerfumeError::ActorCommunicationError(msg)
    }
}
