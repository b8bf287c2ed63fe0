//! Capacity-checked intake and throttled, batched dispatch.

use super::{DispatchError, DispatchStrategies, DispatchStrategy, Role};
use crate::clients::{PackageClient, WarehouseClient};
use crate::model::{DispatchTicket, Package, PackageCreate, PackageId, WarehouseId};
use tracing::{info, instrument, warn, Instrument};

/// What a dispatch call actually delivered.
///
/// Delivering fewer packages than requested is not an error; compare
/// [`DispatchReport::dispatched_count`] with [`DispatchReport::requested`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    pub role: Role,
    pub requested: u64,
    pub packages: Vec<Package>,
}

impl DispatchReport {
    pub fn dispatched_count(&self) -> usize {
        self.packages.len()
    }

    pub fn is_partial(&self) -> bool {
        (self.packages.len() as u64) < self.requested
    }
}

/// Front door of the dispatch side. Holds no state of its own; packages and warehouses live in
/// their actors, so the engine can be cloned freely and called concurrently.
#[derive(Clone)]
pub struct DispatchEngine {
    packages: PackageClient,
    warehouses: WarehouseClient,
    strategies: DispatchStrategies,
}

impl DispatchEngine {
    pub fn new(
        packages: PackageClient,
        warehouses: WarehouseClient,
        strategies: DispatchStrategies,
    ) -> Self {
        Self {
            packages,
            warehouses,
            strategies,
        }
    }

    /// Creates a STORED package in `warehouse_id`, unless the warehouse is full.
    #[instrument(skip(self, package))]
    pub async fn intake(
        &self,
        warehouse_id: WarehouseId,
        package: PackageCreate,
    ) -> Result<Package, DispatchError> {
        let warehouse = self.warehouses.require(warehouse_id).await?;
        Ok(self.packages.intake(warehouse, package).await?)
    }

    /// Moves an existing PACKED package into `warehouse_id`, unless the warehouse is full.
    #[instrument(skip(self))]
    pub async fn store(
        &self,
        warehouse_id: WarehouseId,
        package_id: PackageId,
    ) -> Result<Package, DispatchError> {
        let warehouse = self.warehouses.require(warehouse_id).await?;
        Ok(self.packages.store(warehouse, package_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn stored_count(&self, warehouse_id: WarehouseId) -> Result<u32, DispatchError> {
        let warehouse = self.warehouses.require(warehouse_id).await?;
        Ok(self.packages.stored_count(warehouse.id).await?)
    }

    /// Delivers up to `requested` stored packages, oldest first, in throttled batches.
    ///
    /// The packages are claimed up front so a concurrent dispatch cannot pick them too. Each
    /// batch waits the role's delay and is then delivered in one message. If a batch fails,
    /// the packages not yet delivered are released and the error is returned.
    ///
    /// Once started, a dispatch runs to the end on its own task: dropping the returned future
    /// stops the waiting, not the delivery.
    #[instrument(skip(self))]
    pub async fn dispatch(
        &self,
        requested: i64,
        role: Role,
    ) -> Result<DispatchReport, DispatchError> {
        if requested <= 0 {
            return Err(DispatchError::InvalidQuantity(requested));
        }
        let strategy = self.strategies.for_role(role);
        let quantity = usize::try_from(requested).unwrap_or(usize::MAX);

        let packages = self.packages.clone();
        let delivery = deliver_in_batches(packages, quantity, strategy).in_current_span();
        let run = tokio::spawn(delivery);
        let delivered = run
            .await
            .map_err(|e| DispatchError::Interrupted(e.to_string()))??;

        Ok(DispatchReport {
            role,
            requested: requested as u64,
            packages: delivered,
        })
    }
}

async fn deliver_in_batches(
    packages: PackageClient,
    quantity: usize,
    strategy: DispatchStrategy,
) -> Result<Vec<Package>, DispatchError> {
    let ticket = DispatchTicket::generate();
    let claimed = packages.claim(quantity, &ticket).await?;
    info!(%ticket, claimed = claimed.len(), batch = strategy.batch_size(), "Dispatch started");

    let mut delivered = Vec::with_capacity(claimed.len());
    for batch in claimed.chunks(strategy.batch_size()) {
        tokio::time::sleep(strategy.inter_batch_delay).await;
        match packages.deliver(&ticket, batch.to_vec()).await {
            Ok(done) => delivered.extend(done),
            Err(e) => {
                warn!(%ticket, error = %e, delivered = delivered.len(), "Batch failed");
                if let Err(release) = packages.release_claim(&ticket).await {
                    warn!(%ticket, error = %release, "Releasing claim failed");
                }
                return Err(e.into());
            }
        }
    }

    info!(%ticket, dispatched = delivered.len(), "Dispatch finished");
    Ok(delivered)
}
