//! Production requests and the fulfillment run that carries one through its stages.

use crate::model::{BottleVolume, Category, Perfume, PerfumeDraft, PlantId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Idempotency key of a fulfillment run. Plants reserved by a run carry its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunKey(pub String);

impl RunKey {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl From<&str> for RunKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl Display for RunKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-safe identifier for fulfillment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u32);

impl From<u32> for RunId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRequest {
    pub name: String,
    pub category: Category,
    pub bottle_count: u32,
    pub bottle_volume: BottleVolume,
}

/// A production request plus the optional idempotency key it is submitted under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    #[serde(default)]
    pub key: Option<RunKey>,
    #[serde(flatten)]
    pub request: ProductionRequest,
}

impl From<ProductionRequest> for ProductionOrder {
    fn from(request: ProductionRequest) -> Self {
        Self { key: None, request }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStage {
    Requested,
    UnitsReserved,
    Harvested,
    Assembled,
    Committed,
}

impl RunStage {
    /// The stage a successful step leads to.
    pub fn next(self) -> Option<RunStage> {
        match self {
            RunStage::Requested => Some(RunStage::UnitsReserved),
            RunStage::UnitsReserved => Some(RunStage::Harvested),
            RunStage::Harvested => Some(RunStage::Assembled),
            RunStage::Assembled => Some(RunStage::Committed),
            RunStage::Committed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestRecord {
    pub id: PlantId,
    pub potency: Decimal,
    /// Potency normalization already applied (or not needed).
    pub normalized: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRun {
    pub id: RunId,
    pub key: RunKey,
    pub request: ProductionRequest,
    pub stage: RunStage,
    pub units_needed: u32,
    pub replenished: u32,
    pub reserved: Vec<PlantId>,
    pub harvested: Vec<HarvestRecord>,
    #[serde(skip)]
    pub drafts: Vec<PerfumeDraft>,
    pub perfumes: Vec<Perfume>,
    pub attempts: u32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
