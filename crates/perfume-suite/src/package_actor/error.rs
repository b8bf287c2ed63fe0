//! Error types for the Package actor.

use crate::model::PackageStatus;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PackageError {
    #[error("Package not found: {0}")]
    NotFound(String),

    /// The warehouse already stores as many packages as it can hold.
    #[error("Warehouse {warehouse} is full: {stored} of {capacity} stored")]
    CapacityExceeded {
        warehouse: String,
        stored: u32,
        capacity: u32,
    },

    /// Statuses only move PACKED → STORED → DELIVERED.
    #[error("Package {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        id: String,
        from: PackageStatus,
        to: PackageStatus,
    },

    /// A delivery named a package that the dispatch does not hold.
    #[error("Package {id} is not claimed by dispatch {ticket}")]
    NotClaimed { id: String, ticket: String },

    #[error("Package validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PackageError {
    fn from(msg: String) -> Self {
        PackageError::ActorCommunicationError(msg)
    }
}
