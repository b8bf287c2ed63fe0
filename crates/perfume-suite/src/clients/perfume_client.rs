//! # Perfume Client
use crate::model::{Perfume, PerfumeDraft};
use crate::perfume_actor::{PerfumeCommand, PerfumeCommandResult, PerfumeError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Perfume actor.
#[derive(Clone)]
pub struct PerfumeClient {
    inner: ResourceClient<Perfume>,
}

#[async_trait]
impl ActorClient<Perfume> for PerfumeClient {
    type Error = PerfumeError;

    fn inner(&self) -> &ResourceClient<Perfume> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<PerfumeError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => PerfumeError::NotFound(id),
            Err(other) => PerfumeError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PerfumeClient {
    pub fn new(inner: ResourceClient<Perfume>) -> Self {
        Self { inner }
    }

    pub fn with_timeout(self, limit: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(limit),
        }
    }

    /// Writes the whole batch at once and returns it with ids and serials.
    #[instrument(skip(self, drafts), fields(count = drafts.len()))]
    pub async fn assemble(&self, drafts: Vec<PerfumeDraft>) -> Result<Vec<Perfume>, PerfumeError> {
        debug!("Sending request");
        match self
            .inner
            .execute(PerfumeCommand::Assemble(drafts))
            .await
            .map_err(Self::map_error)?
        {
            PerfumeCommandResult::Assemble(perfumes) => Ok(perfumes),
            _ => unreachable!("Assemble command must return Assemble result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_serial(&self, serial: &str) -> Result<Option<Perfume>, PerfumeError> {
        match self
            .inner
            .execute(PerfumeCommand::FindBySerial(serial.to_string()))
            .await
            .map_err(Self::map_error)?
        {
            PerfumeCommandResult::FindBySerial(perfume) => Ok(perfume),
            _ => unreachable!("FindBySerial command must return FindBySerial result"),
        }
    }
}
