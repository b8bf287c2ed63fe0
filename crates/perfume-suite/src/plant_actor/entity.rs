//! ActorEntity implementation for the Plant domain type.
//!
//! Single-plant work (potency adjustment, updates) goes through actions; everything that picks
//! plants out of the store (FIFO harvest, reservations, availability) goes through commands so
//! that the pick and the write are one message.

use super::actions::{PlantAction, PlantCommand, PlantCommandResult};
use super::error::PlantError;
use crate::model::{HarvestedUnit, Plant, PlantCreate, PlantId, PlantUpdate, RunKey};
use actor_framework::{ActorEntity, EntityStore};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Plant {
    type Id = PlantId;
    type Create = PlantCreate;
    type Update = PlantUpdate;
    type Action = PlantAction;
    type ActionResult = Plant;
    type Command = PlantCommand;
    type CommandResult = PlantCommandResult;
    type Context = ();
    type Error = PlantError;

    fn from_create_params(id: PlantId, params: PlantCreate) -> Result<Self, Self::Error> {
        Plant::plant(id, params)
    }

    /// Name and status are fixed; only the descriptive fields change.
    async fn on_update(&mut self, update: PlantUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(taxonomic_name) = update.taxonomic_name {
            self.taxonomic_name = taxonomic_name;
        }
        if let Some(origin) = update.origin {
            self.origin = origin;
        }
        Ok(())
    }

    /// Harvested plants stay on record; nothing in the suite removes a plant.
    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(PlantError::ValidationError(format!("{} cannot be deleted", self.id)))
    }

    async fn handle_action(
        &mut self,
        action: PlantAction,
        _ctx: &(),
    ) -> Result<Plant, Self::Error> {
        match action {
            PlantAction::AdjustPotency(percent) => {
                let before = self.potency;
                self.scale_potency(percent)?;
                debug!(id = %self.id, %before, after = %self.potency, percent, "Potency adjusted");
                Ok(self.clone())
            }
        }
    }

    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: PlantCommand,
        _ctx: &(),
    ) -> Result<PlantCommandResult, Self::Error> {
        match command {
            PlantCommand::AvailableCount { name } => {
                let available = store.values().filter(|p| p.is_available(&name)).count();
                Ok(PlantCommandResult::AvailableCount(available as u32))
            }
            PlantCommand::PlantBatch { template, count } => {
                require_positive(count)?;
                let mut planted = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let id = store.allocate_id();
                    let plant = Plant::plant(id, template.clone())?;
                    planted.push(plant);
                }
                for plant in &planted {
                    store.insert(plant.id, plant.clone());
                }
                info!(name = %template.name, count, "Batch planted");
                Ok(PlantCommandResult::PlantBatch(planted))
            }
            PlantCommand::Harvest { name, count } => {
                let ids = select_oldest(store, &name, count)?;
                let units = harvest_all(store, &ids)?;
                info!(%name, count, "Harvested");
                Ok(PlantCommandResult::Harvest(units))
            }
            PlantCommand::Reserve { name, count, key } => {
                let held = reserved_by(store, &key);
                if !held.is_empty() {
                    debug!(%key, held = held.len(), "Reservation already held");
                    return Ok(PlantCommandResult::Reserve(held));
                }
                let ids = select_oldest(store, &name, count)?;
                for id in &ids {
                    if let Some(plant) = store.get_mut(id) {
                        plant.reserved_for = Some(key.clone());
                    }
                }
                info!(%name, count, %key, "Reserved");
                Ok(PlantCommandResult::Reserve(ids))
            }
            PlantCommand::HarvestReserved { key } => {
                let ids = reserved_by(store, &key);
                if ids.is_empty() {
                    return Err(PlantError::NotFound(format!("reservation {key}")));
                }
                let units = harvest_all(store, &ids)?;
                info!(%key, count = units.len(), "Harvested reservation");
                Ok(PlantCommandResult::HarvestReserved(units))
            }
            PlantCommand::Release { key } => {
                let mut released = 0;
                for plant in store.values_mut().filter(|p| p.is_reserved_for(&key)) {
                    plant.reserved_for = None;
                    released += 1;
                }
                info!(%key, released, "Reservation released");
                Ok(PlantCommandResult::Release(released))
            }
        }
    }
}

fn require_positive(count: u32) -> Result<(), PlantError> {
    if count == 0 {
        return Err(PlantError::ValidationError("count must be at least 1".into()));
    }
    Ok(())
}

/// Oldest first, ties broken by id.
fn fifo(mut plants: Vec<&Plant>) -> Vec<PlantId> {
    plants.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    plants.into_iter().map(|p| p.id).collect()
}

/// Exactly `count` available plants named `name`, oldest first.
fn select_oldest(
    store: &EntityStore<Plant>,
    name: &str,
    count: u32,
) -> Result<Vec<PlantId>, PlantError> {
    require_positive(count)?;
    let mut ids = fifo(store.values().filter(|p| p.is_available(name)).collect());
    if ids.len() < count as usize {
        return Err(PlantError::InsufficientStock {
            name: name.to_string(),
            requested: count,
            available: ids.len() as u32,
        });
    }
    ids.truncate(count as usize);
    Ok(ids)
}

fn reserved_by(store: &EntityStore<Plant>, key: &RunKey) -> Vec<PlantId> {
    fifo(store.values().filter(|p| p.is_reserved_for(key)).collect())
}

fn harvest_all(
    store: &mut EntityStore<Plant>,
    ids: &[PlantId],
) -> Result<Vec<HarvestedUnit>, PlantError> {
    ids.iter()
        .map(|id| {
            store
                .get_mut(id)
                .ok_or_else(|| PlantError::NotFound(id.to_string()))?
                .harvest()
        })
        .collect()
}
