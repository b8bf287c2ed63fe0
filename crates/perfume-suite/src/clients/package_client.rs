//! # Package Client
use crate::model::{
    DispatchTicket, Package, PackageCreate, PackageId, PackageUpdate, Warehouse, WarehouseId,
};
use crate::package_actor::{PackageCommand, PackageCommandResult, PackageError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Package actor.
#[derive(Clone)]
pub struct PackageClient {
    inner: ResourceClient<Package>,
}

#[async_trait]
impl ActorClient<Package> for PackageClient {
    type Error = PackageError;

    fn inner(&self) -> &ResourceClient<Package> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<PackageError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => PackageError::NotFound(id),
            Err(other) => PackageError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PackageClient {
    pub fn new(inner: ResourceClient<Package>) -> Self {
        Self { inner }
    }

    pub fn with_timeout(self, limit: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(limit),
        }
    }

    /// Creates a PACKED package that belongs to no warehouse yet.
    #[instrument(skip(self))]
    pub async fn create_package(&self, params: PackageCreate) -> Result<PackageId, PackageError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_package(
        &self,
        id: PackageId,
        update: PackageUpdate,
    ) -> Result<Package, PackageError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn command(&self, command: PackageCommand) -> Result<PackageCommandResult, PackageError> {
        self.inner.execute(command).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, warehouse, package), fields(warehouse = %warehouse.id))]
    pub async fn intake(
        &self,
        warehouse: Warehouse,
        package: PackageCreate,
    ) -> Result<Package, PackageError> {
        match self.command(PackageCommand::Intake { warehouse, package }).await? {
            PackageCommandResult::Intake(package) => Ok(package),
            _ => unreachable!("Intake command must return Intake result"),
        }
    }

    #[instrument(skip(self, warehouse), fields(warehouse = %warehouse.id))]
    pub async fn store(
        &self,
        warehouse: Warehouse,
        id: PackageId,
    ) -> Result<Package, PackageError> {
        match self.command(PackageCommand::Store { warehouse, id }).await? {
            PackageCommandResult::Store(package) => Ok(package),
            _ => unreachable!("Store command must return Store result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn stored_count(&self, warehouse: WarehouseId) -> Result<u32, PackageError> {
        match self.command(PackageCommand::StoredCount { warehouse }).await? {
            PackageCommandResult::StoredCount(n) => Ok(n),
            _ => unreachable!("StoredCount command must return StoredCount result"),
        }
    }

    /// Claims up to `quantity` stored packages for `ticket`, lowest id first.
    #[instrument(skip(self))]
    pub async fn claim(
        &self,
        quantity: usize,
        ticket: &DispatchTicket,
    ) -> Result<Vec<PackageId>, PackageError> {
        match self
            .command(PackageCommand::Claim {
                quantity,
                ticket: ticket.clone(),
            })
            .await?
        {
            PackageCommandResult::Claim(ids) => Ok(ids),
            _ => unreachable!("Claim command must return Claim result"),
        }
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn deliver(
        &self,
        ticket: &DispatchTicket,
        ids: Vec<PackageId>,
    ) -> Result<Vec<Package>, PackageError> {
        match self
            .command(PackageCommand::Deliver {
                ticket: ticket.clone(),
                ids,
            })
            .await?
        {
            PackageCommandResult::Deliver(packages) => Ok(packages),
            _ => unreachable!("Deliver command must return Deliver result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_claim(&self, ticket: &DispatchTicket) -> Result<u32, PackageError> {
        match self
            .command(PackageCommand::ReleaseClaim { ticket: ticket.clone() })
            .await?
        {
            PackageCommandResult::ReleaseClaim(n) => Ok(n),
            _ => unreachable!("ReleaseClaim command must return ReleaseClaim result"),
        }
    }
}
