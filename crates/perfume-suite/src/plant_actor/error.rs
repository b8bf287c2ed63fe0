//! Error types for the Plant actor.

use thiserror::Error;

/// Errors that can occur during plant operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlantError {
    /// The requested plant was not found.
    #[error("Plant not found: {0}")]
    NotFound(String),

    /// Fewer eligible plants exist than were asked for. Nothing was changed.
    #[error("Insufficient stock of {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    /// Malformed or out-of-range input.
    #[error("Plant validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PlantError {
    fn from(msg: String) -> Self {
        PlantError::ActorCommunicationError(msg)
    }
}
