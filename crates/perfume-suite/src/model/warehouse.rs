use crate::warehouse_actor::WarehouseError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Warehouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(pub u32);

impl From<u32> for WarehouseId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for WarehouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warehouse_{}", self.0)
    }
}

/// A capacity-bound holding location for packages.
///
/// The packages themselves live in the package actor; a package belongs to a warehouse
/// through its `warehouse_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub label: String,
    pub location: String,
    /// Maximum number of STORED packages.
    pub capacity: u32,
}

impl Warehouse {
    pub fn new(id: WarehouseId, params: WarehouseCreate) -> Result<Self, WarehouseError> {
        if params.label.trim().is_empty() {
            return Err(WarehouseError::ValidationError("label must not be empty".into()));
        }
        if params.capacity == 0 {
            return Err(WarehouseError::ValidationError("capacity must be at least 1".into()));
        }
        Ok(Self {
            id,
            label: params.label,
            location: params.location,
            capacity: params.capacity,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseCreate {
    pub label: String,
    pub location: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseUpdate {
    pub label: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
}
