//! Wire shapes of the internal RPC contract. Field names are camelCase on the wire.

use crate::dispatch::{DispatchReport, Role};
use crate::model::{
    HarvestedUnit, Package, PackageCreate, PlantCreate, PlantId, ProductionOrder, WarehouseId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request headers. Names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// One call of the internal surface, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum RpcCall {
    /// `GET available-count?name=`
    AvailableCount { name: String },
    /// `POST create-unit`
    CreateUnit(PlantCreate),
    /// `POST harvest`
    Harvest(HarvestBody),
    /// `PATCH adjust-potency/{id}`
    AdjustPotency { id: PlantId, percent: u32 },
    /// `POST dispatch`, role taken from the role header
    #[serde(rename_all = "camelCase")]
    Dispatch { requested_quantity: i64 },
    /// `POST intake/{warehouseId}`
    #[serde(rename_all = "camelCase")]
    Intake {
        warehouse_id: WarehouseId,
        #[serde(flatten)]
        package: PackageCreate,
    },
    /// `POST produce`
    Produce(ProductionOrder),
}

impl RpcCall {
    /// Route-style name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            RpcCall::AvailableCount { .. } => "available-count",
            RpcCall::CreateUnit(_) => "create-unit",
            RpcCall::Harvest(_) => "harvest",
            RpcCall::AdjustPotency { .. } => "adjust-potency",
            RpcCall::Dispatch { .. } => "dispatch",
            RpcCall::Intake { .. } => "intake",
            RpcCall::Produce(_) => "produce",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub headers: Headers,
    pub call: RpcCall,
}

impl RpcRequest {
    pub fn new(headers: Headers, call: RpcCall) -> Self {
        Self { headers, call }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RpcResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestBody {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableCountResponse {
    pub name: String,
    pub available: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestResponse {
    pub harvested_units: Vec<HarvestedUnit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub role: Role,
    pub dispatched_count: usize,
    pub packages: Vec<Package>,
}

impl From<DispatchReport> for DispatchResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            role: report.role,
            dispatched_count: report.dispatched_count(),
            packages: report.packages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}
