//! # Plant Client
//!
//! Provides a high‑level API for interacting with the `Plant` actor.
//! It wraps a `ResourceClient<Plant>` and exposes domain‑specific methods.
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{HarvestedUnit, Plant, PlantCreate, PlantId, PlantUpdate, RunKey};
use crate::plant_actor::{PlantAction, PlantCommand, PlantCommandResult, PlantError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Plant actor.
#[derive(Clone)]
pub struct PlantClient {
    inner: ResourceClient<Plant>,
}

#[async_trait]
impl ActorClient<Plant> for PlantClient {
    type Error = PlantError;

    fn inner(&self) -> &ResourceClient<Plant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<PlantError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => PlantError::NotFound(id),
            Err(other) => PlantError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PlantClient {
    pub fn new(inner: ResourceClient<Plant>) -> Self {
        Self { inner }
    }

    /// Same actor, every call bounded by `limit`.
    pub fn with_timeout(self, limit: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(limit),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_plant(&self, params: PlantCreate) -> Result<PlantId, PlantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_plant(
        &self,
        id: PlantId,
        update: PlantUpdate,
    ) -> Result<Plant, PlantError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Scales the plant's potency to `percent` of its current value and returns the plant.
    #[instrument(skip(self))]
    pub async fn adjust_potency(&self, id: PlantId, percent: u32) -> Result<Plant, PlantError> {
        debug!("Adjusting potency of {} to {}%", id, percent);
        self.inner
            .perform_action(id, PlantAction::AdjustPotency(percent))
            .await
            .map_err(Self::map_error)
    }

    async fn command(&self, command: PlantCommand) -> Result<PlantCommandResult, PlantError> {
        self.inner.execute(command).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn available_count(&self, name: &str) -> Result<u32, PlantError> {
        match self
            .command(PlantCommand::AvailableCount { name: name.to_string() })
            .await?
        {
            PlantCommandResult::AvailableCount(n) => Ok(n),
            _ => unreachable!("AvailableCount command must return AvailableCount result"),
        }
    }

    /// Plants `count` units from `template` in one request.
    #[instrument(skip(self, template), fields(name = %template.name))]
    pub async fn plant_batch(
        &self,
        template: PlantCreate,
        count: u32,
    ) -> Result<Vec<Plant>, PlantError> {
        match self.command(PlantCommand::PlantBatch { template, count }).await? {
            PlantCommandResult::PlantBatch(plants) => Ok(plants),
            _ => unreachable!("PlantBatch command must return PlantBatch result"),
        }
    }

    /// Harvests exactly `count` plants named `name`, oldest first.
    #[instrument(skip(self))]
    pub async fn harvest(&self, name: &str, count: u32) -> Result<Vec<HarvestedUnit>, PlantError> {
        match self
            .command(PlantCommand::Harvest { name: name.to_string(), count })
            .await?
        {
            PlantCommandResult::Harvest(units) => Ok(units),
            _ => unreachable!("Harvest command must return Harvest result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        name: &str,
        count: u32,
        key: &RunKey,
    ) -> Result<Vec<PlantId>, PlantError> {
        match self
            .command(PlantCommand::Reserve {
                name: name.to_string(),
                count,
                key: key.clone(),
            })
            .await?
        {
            PlantCommandResult::Reserve(ids) => Ok(ids),
            _ => unreachable!("Reserve command must return Reserve result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn harvest_reserved(&self, key: &RunKey) -> Result<Vec<HarvestedUnit>, PlantError> {
        match self
            .command(PlantCommand::HarvestReserved { key: key.clone() })
            .await?
        {
            PlantCommandResult::HarvestReserved(units) => Ok(units),
            _ => unreachable!("HarvestReserved command must return HarvestReserved result"),
        }
    }

    /// Returns how many plants went back into stock.
    #[instrument(skip(self))]
    pub async fn release(&self, key: &RunKey) -> Result<u32, PlantError> {
        match self.command(PlantCommand::Release { key: key.clone() }).await? {
            PlantCommandResult::Release(n) => Ok(n),
            _ => unreachable!("Release command must return Release result"),
        }
    }
}
