//! # Framework Errors
//!
//! Common error types shared by every actor and client. Entity errors travel boxed inside
//! [`FrameworkError::EntityError`]; typed clients recover them with
//! [`FrameworkError::downcast_entity`] so callers see the entity's own error unchanged.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns the original `FrameworkError` when it is a transport failure or carries an
    /// error of a different type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }

    /// True for failures of the channel itself rather than of the entity logic.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped | FrameworkError::Timeout(_)
        )
    }
}
