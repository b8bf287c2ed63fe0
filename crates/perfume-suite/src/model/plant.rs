//! A cultivated resource unit ("plant") that yields raw material once harvested.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`impl ActorEntity for Plant`](#impl-ActorEntity-for-Plant) for details on:
//! - Creation parameters ([`PlantCreate`])
//! - Update parameters ([`PlantUpdate`])
//! - Custom actions ([`PlantAction`](crate::plant_actor::PlantAction))
//! - Collection commands ([`PlantCommand`](crate::plant_actor::PlantCommand))

use crate::model::RunKey;
use crate::plant_actor::PlantError;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lowest potency a plant can have.
pub const MIN_POTENCY: Decimal = Decimal::from_parts(100, 0, 0, false, 2);
/// Highest potency a plant can have.
pub const MAX_POTENCY: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Type-safe identifier for Plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub u32);

impl From<u32> for PlantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PlantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "plant_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantStatus {
    Planted,
    Harvested,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub taxonomic_name: String,
    pub origin: String,
    pub potency: Decimal,
    pub status: PlantStatus,
    pub created_at: DateTime<Utc>,
    /// Fulfillment run currently holding this plant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_for: Option<RunKey>,
}

impl Plant {
    /// Plants a new unit. A missing potency is drawn uniformly from the potency domain.
    pub fn plant(id: PlantId, params: PlantCreate) -> Result<Self, PlantError> {
        if params.name.trim().is_empty() {
            return Err(PlantError::ValidationError("name must not be empty".into()));
        }
        let potency = match params.potency {
            Some(potency) if (MIN_POTENCY..=MAX_POTENCY).contains(&potency) => {
                round_potency(potency)
            }
            Some(potency) => {
                return Err(PlantError::ValidationError(format!(
                    "potency {potency} outside [{MIN_POTENCY}, {MAX_POTENCY}]"
                )))
            }
            None => random_potency(),
        };

        Ok(Self {
            id,
            name: params.name,
            taxonomic_name: params.taxonomic_name,
            origin: params.origin,
            potency,
            status: PlantStatus::Planted,
            created_at: Utc::now(),
            reserved_for: None,
        })
    }

    /// Planted, unreserved and called `name`.
    pub fn is_available(&self, name: &str) -> bool {
        self.status == PlantStatus::Planted && self.reserved_for.is_none() && self.name == name
    }

    pub fn is_reserved_for(&self, key: &RunKey) -> bool {
        self.status == PlantStatus::Planted && self.reserved_for.as_ref() == Some(key)
    }

    /// Scales potency to `percent` of its current value, floored at [`MIN_POTENCY`].
    pub fn scale_potency(&mut self, percent: u32) -> Result<(), PlantError> {
        if !(1..=100).contains(&percent) {
            return Err(PlantError::ValidationError(format!(
                "percent {percent} outside [1, 100]"
            )));
        }
        let scaled = round_potency(self.potency * Decimal::from(percent) / Decimal::ONE_HUNDRED);
        self.potency = scaled.max(MIN_POTENCY);
        Ok(())
    }

    /// PLANTED → HARVESTED. Fails if the plant was already harvested.
    pub fn harvest(&mut self) -> Result<HarvestedUnit, PlantError> {
        if self.status == PlantStatus::Harvested {
            return Err(PlantError::ValidationError(format!(
                "{} is already harvested",
                self.id
            )));
        }
        self.status = PlantStatus::Harvested;
        self.reserved_for = None;
        Ok(HarvestedUnit {
            id: self.id,
            potency: self.potency,
        })
    }
}

pub fn round_potency(potency: Decimal) -> Decimal {
    potency.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn random_potency() -> Decimal {
    let cents = rand::thread_rng().gen_range(100..=500);
    Decimal::new(cents, 2)
}

/// Payload for planting a new unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantCreate {
    pub name: String,
    pub taxonomic_name: String,
    pub origin: String,
    #[serde(default)]
    pub potency: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantUpdate {
    pub taxonomic_name: Option<String>,
    pub origin: Option<String>,
}

/// What a harvest hands back for each unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestedUnit {
    pub id: PlantId,
    pub potency: Decimal,
}
