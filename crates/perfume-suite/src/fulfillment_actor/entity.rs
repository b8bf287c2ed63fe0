//! ActorEntity implementation for fulfillment runs, and the run state machine.
//!
//! A run moves Requested → UnitsReserved → Harvested → Assembled → Committed, one step per
//! stage:
//!
//! | From | Work | Calls |
//! |------|------|-------|
//! | Requested | replenish the shortfall, reserve `units_needed` plants | `available_count`, `plant_batch`, `reserve` |
//! | UnitsReserved | harvest the reservation | `harvest_reserved` |
//! | Harvested | normalize potency, draft bottles round robin | `adjust_potency` |
//! | Assembled | write the batch | `assemble` |
//!
//! A failure while the plants are only reserved releases them and sends the run back to
//! Requested. A later failure keeps the stage; producing under the same key resumes there.

use super::actions::{FulfillmentCommand, FulfillmentCommandResult};
use super::error::FulfillmentError;
use super::plan;
use super::FulfillmentContext;
use crate::model::{
    FulfillmentRun, HarvestRecord, Perfume, PerfumeDraft, PlantCreate, ProductionOrder,
    ProductionRequest, RunId, RunKey, RunStage,
};
use actor_framework::{ActorEntity, EntityStore};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

impl FulfillmentRun {
    /// Registers a run in the Requested stage.
    pub fn open(
        id: RunId,
        key: RunKey,
        request: ProductionRequest,
    ) -> Result<Self, FulfillmentError> {
        if request.name.trim().is_empty() {
            return Err(FulfillmentError::ValidationError("name must not be empty".into()));
        }
        if request.bottle_count == 0 {
            return Err(FulfillmentError::ValidationError(
                "bottle count must be at least 1".into(),
            ));
        }
        let units_needed = plan::units_needed(request.bottle_count, request.bottle_volume)
            .ok_or_else(|| FulfillmentError::ValidationError("bottle count too large".into()))?;

        let now = Utc::now();
        Ok(Self {
            id,
            key,
            request,
            stage: RunStage::Requested,
            units_needed,
            replenished: 0,
            reserved: Vec::new(),
            harvested: Vec::new(),
            drafts: Vec::new(),
            perfumes: Vec::new(),
            attempts: 0,
            last_error: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Drives the run to Committed and returns its perfumes.
    pub async fn execute(
        &mut self,
        ctx: &FulfillmentContext,
    ) -> Result<Vec<Perfume>, FulfillmentError> {
        if self.stage == RunStage::Committed {
            info!(key = %self.key, "Run already committed");
            return Ok(self.perfumes.clone());
        }
        self.attempts += 1;
        info!(key = %self.key, stage = ?self.stage, attempt = self.attempts, "Run started");

        while self.stage != RunStage::Committed {
            if let Err(e) = self.step(ctx).await {
                warn!(key = %self.key, stage = ?self.stage, error = %e, "Run step failed");
                self.last_error = Some(e.to_string());
                self.updated_at = Utc::now();
                if self.stage == RunStage::UnitsReserved {
                    self.release(ctx).await;
                }
                return Err(e);
            }
        }

        self.last_error = None;
        info!(key = %self.key, perfumes = self.perfumes.len(), "Run committed");
        Ok(self.perfumes.clone())
    }

    async fn step(&mut self, ctx: &FulfillmentContext) -> Result<(), FulfillmentError> {
        match self.stage {
            RunStage::Requested => {
                let name = self.request.name.clone();
                let available = ctx.plants.available_count(&name).await?;
                let missing = plan::shortfall(self.units_needed, available);
                if missing > 0 {
                    let template = PlantCreate {
                        name: name.clone(),
                        taxonomic_name: name.clone(),
                        origin: ctx.default_origin.clone(),
                        potency: None,
                    };
                    ctx.plants.plant_batch(template, missing).await?;
                    self.replenished += missing;
                    info!(key = %self.key, missing, "Shortfall replenished");
                }
                self.reserved = ctx.plants.reserve(&name, self.units_needed, &self.key).await?;
                self.advance(RunStage::UnitsReserved)
            }
            RunStage::UnitsReserved => {
                let units = ctx.plants.harvest_reserved(&self.key).await?;
                self.harvested = units
                    .into_iter()
                    .map(|unit| HarvestRecord {
                        id: unit.id,
                        potency: unit.potency,
                        normalized: false,
                    })
                    .collect();
                self.advance(RunStage::Harvested)
            }
            RunStage::Harvested => {
                for record in self.harvested.iter_mut().filter(|r| !r.normalized) {
                    if let Some(percent) = plan::normalization_percent(record.potency) {
                        let plant = ctx.plants.adjust_potency(record.id, percent).await?;
                        record.potency = plant.potency;
                    }
                    record.normalized = true;
                }

                let now = Utc::now();
                let request = &self.request;
                let harvested = &self.harvested;
                self.drafts = plan::round_robin(request.bottle_count, harvested.len())
                    .into_iter()
                    .map(|unit| {
                        PerfumeDraft::new(
                            request.name.clone(),
                            request.category,
                            request.bottle_volume,
                            harvested[unit].id,
                            now,
                        )
                    })
                    .collect();
                self.advance(RunStage::Assembled)
            }
            RunStage::Assembled => {
                self.perfumes = ctx.perfumes.assemble(self.drafts.clone()).await?;
                self.advance(RunStage::Committed)
            }
            RunStage::Committed => Ok(()),
        }
    }

    fn advance(&mut self, to: RunStage) -> Result<(), FulfillmentError> {
        if self.stage.next() != Some(to) {
            return Err(FulfillmentError::InvalidTransition {
                key: self.key.to_string(),
                from: self.stage,
                to,
            });
        }
        info!(key = %self.key, from = ?self.stage, to = ?to, "Run advanced");
        self.stage = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Gives the reserved plants back and restarts the run from Requested.
    async fn release(&mut self, ctx: &FulfillmentContext) {
        match ctx.plants.release(&self.key).await {
            Ok(released) => info!(key = %self.key, released, "Reservation released"),
            Err(e) => warn!(key = %self.key, error = %e, "Release failed"),
        }
        self.reserved.clear();
        self.stage = RunStage::Requested;
    }
}

#[async_trait]
impl ActorEntity for FulfillmentRun {
    type Id = RunId;
    type Create = ProductionOrder;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Command = FulfillmentCommand;
    type CommandResult = FulfillmentCommandResult;
    type Context = FulfillmentContext;
    type Error = FulfillmentError;

    fn from_create_params(id: RunId, order: ProductionOrder) -> Result<Self, Self::Error> {
        let key = order.key.unwrap_or_else(RunKey::generate);
        FulfillmentRun::open(id, key, order.request)
    }

    async fn on_update(
        &mut self,
        _update: (),
        _ctx: &FulfillmentContext,
    ) -> Result<(), Self::Error> {
        Err(FulfillmentError::ValidationError(
            "runs change only by producing".into(),
        ))
    }

    /// Runs are the idempotency record for their keys.
    async fn on_delete(&self, _ctx: &FulfillmentContext) -> Result<(), Self::Error> {
        Err(FulfillmentError::ValidationError(format!(
            "run {} cannot be deleted",
            self.key
        )))
    }

    async fn handle_action(
        &mut self,
        _action: (),
        _ctx: &FulfillmentContext,
    ) -> Result<(), Self::Error> {
        Err(FulfillmentError::ValidationError(
            "runs have no per-run actions".into(),
        ))
    }

    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: FulfillmentCommand,
        ctx: &FulfillmentContext,
    ) -> Result<FulfillmentCommandResult, Self::Error> {
        match command {
            FulfillmentCommand::Produce(order) => {
                let key = order.key.clone().unwrap_or_else(RunKey::generate);
                let existing = store
                    .values()
                    .find(|run| run.key == key)
                    .map(|run| (run.id, run.request == order.request));

                let id = match existing {
                    Some((id, true)) => id,
                    Some((_, false)) => {
                        return Err(FulfillmentError::ValidationError(format!(
                            "key {key} already belongs to a different request"
                        )))
                    }
                    None => {
                        let id = store.allocate_id();
                        let run = FulfillmentRun::open(id, key, order.request)?;
                        store.insert(id, run);
                        id
                    }
                };

                let run = store
                    .get_mut(&id)
                    .ok_or_else(|| FulfillmentError::NotFound(id.to_string()))?;
                let perfumes = run.execute(ctx).await?;
                Ok(FulfillmentCommandResult::Produce(perfumes))
            }
            FulfillmentCommand::FindByKey(key) => Ok(FulfillmentCommandResult::FindByKey(
                store.values().find(|run| run.key == key).cloned(),
            )),
        }
    }
}
