//! Error types for the Warehouse actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WarehouseError {
    #[error("Warehouse not found: {0}")]
    NotFound(String),

    #[error("Warehouse validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for WarehouseError {
    fn from(msg: String) -> Self {
        WarehouseError::ActorCommunicationError(msg)
    }
}
