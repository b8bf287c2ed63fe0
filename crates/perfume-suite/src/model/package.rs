//! Shipping containers tracked through PACKED → STORED → DELIVERED.

use crate::model::{PerfumeId, WarehouseId};
use crate::package_actor::PackageError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Packages. Ascending ids double as the FIFO dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(pub u32);

impl From<u32> for PackageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "package_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Packed,
    Stored,
    Delivered,
}

/// One dispatch call's hold on the packages it selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchTicket(pub String);

impl DispatchTicket {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Display for DispatchTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub label: String,
    pub sender_address: String,
    pub item_refs: Vec<PerfumeId>,
    pub status: PackageStatus,
    pub warehouse_id: Option<WarehouseId>,
    #[serde(skip)]
    pub claimed_by: Option<DispatchTicket>,
}

impl Package {
    pub fn new(id: PackageId, params: PackageCreate) -> Result<Self, PackageError> {
        if params.label.trim().is_empty() {
            return Err(PackageError::ValidationError("label must not be empty".into()));
        }
        Ok(Self {
            id,
            label: params.label,
            sender_address: params.sender_address,
            item_refs: params.item_refs,
            status: PackageStatus::Packed,
            warehouse_id: None,
            claimed_by: None,
        })
    }

    /// Counts against `warehouse`'s capacity.
    pub fn is_stored_in(&self, warehouse: WarehouseId) -> bool {
        self.status == PackageStatus::Stored && self.warehouse_id == Some(warehouse)
    }

    /// Stored and not held by any dispatch.
    pub fn is_dispatchable(&self) -> bool {
        self.status == PackageStatus::Stored && self.claimed_by.is_none()
    }

    /// Moves the package one step forward. Statuses never go back or skip a step.
    pub fn advance(&mut self, to: PackageStatus) -> Result<(), PackageError> {
        let allowed = matches!(
            (self.status, to),
            (PackageStatus::Packed, PackageStatus::Stored)
                | (PackageStatus::Stored, PackageStatus::Delivered)
        );
        if !allowed {
            return Err(PackageError::InvalidTransition {
                id: self.id.to_string(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCreate {
    pub label: String,
    pub sender_address: String,
    #[serde(default)]
    pub item_refs: Vec<PerfumeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdate {
    pub label: Option<String>,
    pub sender_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed() -> Package {
        Package::new(
            PackageId(1),
            PackageCreate {
                label: "box".into(),
                sender_address: "Main St 1".into(),
                item_refs: vec![PerfumeId(3)],
            },
        )
        .unwrap()
    }

    #[test]
    fn test_status_is_monotonic() {
        let mut package = packed();
        assert!(package.advance(PackageStatus::Delivered).is_err());
        package.advance(PackageStatus::Stored).unwrap();
        package.advance(PackageStatus::Delivered).unwrap();

        let err = package.advance(PackageStatus::Stored).unwrap_err();
        assert!(matches!(
            err,
            PackageError::InvalidTransition {
                from: PackageStatus::Delivered,
                to: PackageStatus::Stored,
                ..
            }
        ));
    }

    #[test]
    fn test_item_refs_default_to_empty() {
        let params: PackageCreate =
            serde_json::from_str(r#"{"label":"box","senderAddress":"Main St 1"}"#).unwrap();
        assert!(params.item_refs.is_empty());
    }
}
