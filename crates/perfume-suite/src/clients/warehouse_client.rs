//! # Warehouse Client
use crate::model::{Warehouse, WarehouseCreate, WarehouseId, WarehouseUpdate};
use crate::warehouse_actor::{WarehouseCommand, WarehouseError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Warehouse actor.
#[derive(Clone)]
pub struct WarehouseClient {
    inner: ResourceClient<Warehouse>,
}

#[async_trait]
impl ActorClient<Warehouse> for WarehouseClient {
    type Error = WarehouseError;

    fn inner(&self) -> &ResourceClient<Warehouse> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<WarehouseError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => WarehouseError::NotFound(id),
            Err(other) => WarehouseError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl WarehouseClient {
    pub fn new(inner: ResourceClient<Warehouse>) -> Self {
        Self { inner }
    }

    pub fn with_timeout(self, limit: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(limit),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_warehouse(
        &self,
        params: WarehouseCreate,
    ) -> Result<WarehouseId, WarehouseError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_warehouse(
        &self,
        id: WarehouseId,
        update: WarehouseUpdate,
    ) -> Result<Warehouse, WarehouseError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but a missing warehouse is an error.
    pub async fn require(&self, id: WarehouseId) -> Result<Warehouse, WarehouseError> {
        self.get(id)
            .await?
            .ok_or_else(|| WarehouseError::NotFound(id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Warehouse>, WarehouseError> {
        self.inner
            .execute(WarehouseCommand::List)
            .await
            .map_err(Self::map_error)
    }
}
