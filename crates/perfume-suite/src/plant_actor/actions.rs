//! Custom actions and collection commands for the Plant actor.
//!
//! Actions address one [`Plant`](crate::model::Plant) by id and are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action). Commands select
//! plants across the whole store and are handled by
//! [`ActorEntity::handle_command`](actor_framework::ActorEntity::handle_command); a command's
//! selection and write happen in the same message.

use crate::model::{HarvestedUnit, Plant, PlantCreate, PlantId, RunKey};

/// Custom actions for a single plant.
#[derive(Debug, Clone)]
pub enum PlantAction {
    /// Scales potency to the given percent of its current value.
    ///
    /// # Errors
    /// Fails unless the percent lies in `[1, 100]`.
    AdjustPotency(u32),
}

/// Collection commands over all plants.
#[derive(Debug, Clone)]
pub enum PlantCommand {
    /// Counts PLANTED, unreserved plants with this name.
    AvailableCount { name: String },
    /// Plants `count` units from one template.
    PlantBatch { template: PlantCreate, count: u32 },
    /// Harvests the `count` oldest available plants with this name, or none.
    Harvest { name: String, count: u32 },
    /// Reserves the `count` oldest available plants with this name for `key`, or none.
    Reserve { name: String, count: u32, key: RunKey },
    /// Harvests every plant reserved for `key`.
    HarvestReserved { key: RunKey },
    /// Drops every reservation held by `key` on plants still in the ground.
    Release { key: RunKey },
}

/// Results from PlantCommands - variants match 1:1 with PlantCommand
#[derive(Debug, Clone, PartialEq)]
pub enum PlantCommandResult {
    AvailableCount(u32),
    PlantBatch(Vec<Plant>),
    Harvest(Vec<HarvestedUnit>),
    Reserve(Vec<PlantId>),
    HarvestReserved(Vec<HarvestedUnit>),
    Release(u32),
}
