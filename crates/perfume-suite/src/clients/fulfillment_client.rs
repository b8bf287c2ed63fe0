//! # Fulfillment Client
//!
//! Entry point for production requests.
use crate::fulfillment_actor::{FulfillmentCommand, FulfillmentCommandResult, FulfillmentError};
use crate::model::{FulfillmentRun, Perfume, ProductionOrder, ProductionRequest, RunKey};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Fulfillment actor.
#[derive(Clone)]
pub struct FulfillmentClient {
    inner: ResourceClient<FulfillmentRun>,
}

#[async_trait]
impl ActorClient<FulfillmentRun> for FulfillmentClient {
    type Error = FulfillmentError;

    fn inner(&self) -> &ResourceClient<FulfillmentRun> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<FulfillmentError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => FulfillmentError::NotFound(id),
            Err(other) => FulfillmentError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl FulfillmentClient {
    pub fn new(inner: ResourceClient<FulfillmentRun>) -> Self {
        Self { inner }
    }

    pub fn with_timeout(self, limit: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(limit),
        }
    }

    /// Produces under a fresh key.
    pub async fn produce(
        &self,
        request: ProductionRequest,
    ) -> Result<Vec<Perfume>, FulfillmentError> {
        self.submit(ProductionOrder::from(request)).await
    }

    /// Produces under `key`; safe to repeat.
    pub async fn produce_with_key(
        &self,
        key: RunKey,
        request: ProductionRequest,
    ) -> Result<Vec<Perfume>, FulfillmentError> {
        self.submit(ProductionOrder {
            key: Some(key),
            request,
        })
        .await
    }

    #[instrument(
        skip(self, order),
        fields(name = %order.request.name, bottles = order.request.bottle_count)
    )]
    pub async fn submit(&self, order: ProductionOrder) -> Result<Vec<Perfume>, FulfillmentError> {
        debug!("Sending request");
        match self
            .inner
            .execute(FulfillmentCommand::Produce(order))
            .await
            .map_err(Self::map_error)?
        {
            FulfillmentCommandResult::Produce(perfumes) => Ok(perfumes),
            _ => unreachable!("Produce command must return Produce result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_run(&self, key: &RunKey) -> Result<Option<FulfillmentRun>, FulfillmentError> {
        match self
            .inner
            .execute(FulfillmentCommand::FindByKey(key.clone()))
            .await
            .map_err(Self::map_error)?
        {
            FulfillmentCommandResult::FindByKey(run) => Ok(run),
            _ => unreachable!("FindByKey command must return FindByKey result"),
        }
    }
}
