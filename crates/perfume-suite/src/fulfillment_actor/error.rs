//! Error types for the Fulfillment actor.

use crate::model::RunStage;
use crate::perfume_actor::PerfumeError;
use crate::plant_actor::PlantError;
use thiserror::Error;

/// Errors of a production run. Failures of the plant and perfume actors pass through
/// unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FulfillmentError {
    #[error("Fulfillment run not found: {0}")]
    NotFound(String),

    #[error("Fulfillment validation error: {0}")]
    ValidationError(String),

    #[error("Run {key} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        key: String,
        from: RunStage,
        to: RunStage,
    },

    #[error(transparent)]
    Plant(#[from] PlantError),

    #[error(transparent)]
    Perfume(#[from] PerfumeError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for FulfillmentError {
    fn from(msg: String) -> Self {
        FulfillmentError::ActorCommunicationError(msg)
    }
}
