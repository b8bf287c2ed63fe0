//! The error taxonomy seen by RPC callers, and how each component's errors map onto it.

use crate::dispatch::DispatchError;
use crate::fulfillment_actor::FulfillmentError;
use crate::package_actor::PackageError;
use crate::perfume_actor::PerfumeError;
use crate::plant_actor::PlantError;
use crate::warehouse_actor::WarehouseError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RpcError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("Missing or invalid internal credential")]
    UnauthorizedInternal,

    /// The component behind the call did not answer (closed, dropped or timed out).
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl RpcError {
    pub fn status(&self) -> u16 {
        match self {
            RpcError::Validation(_) => 400,
            RpcError::UnauthorizedInternal => 401,
            RpcError::NotFound(_) => 404,
            RpcError::InsufficientStock(_) | RpcError::CapacityExceeded(_) => 409,
            RpcError::Internal(_) => 500,
            RpcError::Unavailable(_) => 503,
        }
    }

    /// Stable name used in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RpcError::Validation(_) => "ValidationError",
            RpcError::NotFound(_) => "NotFoundError",
            RpcError::InsufficientStock(_) => "InsufficientStockError",
            RpcError::CapacityExceeded(_) => "CapacityExceededError",
            RpcError::UnauthorizedInternal => "UnauthorizedInternalError",
            RpcError::Unavailable(_) => "UnavailableError",
            RpcError::Internal(_) => "InternalError",
        }
    }
}

impl From<PlantError> for RpcError {
    fn from(e: PlantError) -> Self {
        let message = e.to_string();
        match e {
            PlantError::NotFound(_) => RpcError::NotFound(message),
            PlantError::InsufficientStock { .. } => RpcError::InsufficientStock(message),
            PlantError::ValidationError(_) => RpcError::Validation(message),
            PlantError::ActorCommunicationError(_) => RpcError::Unavailable(message),
        }
    }
}

impl From<PerfumeError> for RpcError {
    fn from(e: PerfumeError) -> Self {
        let message = e.to_string();
        match e {
            PerfumeError::NotFound(_) => RpcError::NotFound(message),
            PerfumeError::ValidationError(_) => RpcError::Validation(message),
            PerfumeError::ActorCommunicationError(_) => RpcError::Unavailable(message),
        }
    }
}

impl From<FulfillmentError> for RpcError {
    fn from(e: FulfillmentError) -> Self {
        let message = e.to_string();
        match e {
            FulfillmentError::Plant(inner) => inner.into(),
            FulfillmentError::Perfume(inner) => inner.into(),
            FulfillmentError::NotFound(_) => RpcError::NotFound(message),
            FulfillmentError::ValidationError(_) => RpcError::Validation(message),
            FulfillmentError::InvalidTransition { .. } => RpcError::Internal(message),
            FulfillmentError::ActorCommunicationError(_) => RpcError::Unavailable(message),
        }
    }
}

impl From<WarehouseError> for RpcError {
    fn from(e: WarehouseError) -> Self {
        let message = e.to_string();
        match e {
            WarehouseError::NotFound(_) => RpcError::NotFound(message),
            WarehouseError::ValidationError(_) => RpcError::Validation(message),
            WarehouseError::ActorCommunicationError(_) => RpcError::Unavailable(message),
        }
    }
}

impl From<PackageError> for RpcError {
    fn from(e: PackageError) -> Self {
        let message = e.to_string();
        match e {
            PackageError::NotFound(_) => RpcError::NotFound(message),
            PackageError::CapacityExceeded { .. } => RpcError::CapacityExceeded(message),
            PackageError::InvalidTransition { .. }
            | PackageError::NotClaimed { .. }
            | PackageError::ValidationError(_) => RpcError::Validation(message),
            PackageError::ActorCommunicationError(_) => RpcError::Unavailable(message),
        }
    }
}

impl From<DispatchError> for RpcError {
    fn from(e: DispatchError) -> Self {
        let message = e.to_string();
        match e {
            DispatchError::InvalidQuantity(_) | DispatchError::UnknownRole(_) => {
                RpcError::Validation(message)
            }
            DispatchError::Interrupted(_) => RpcError::Internal(message),
            DispatchError::Warehouse(inner) => inner.into(),
            DispatchError::Package(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_errors_keep_their_kind() {
        let e: RpcError = FulfillmentError::Plant(PlantError::InsufficientStock {
            name: "Rose".into(),
            requested: 12,
            available: 4,
        })
        .into();
        assert_eq!(e.status(), 409);
        assert_eq!(e.kind(), "InsufficientStockError");
        assert_eq!(
            e.to_string(),
            "Insufficient stock of Rose: requested 12, available 4"
        );

        let e: RpcError =
            DispatchError::Warehouse(WarehouseError::NotFound("warehouse_3".into())).into();
        assert_eq!(e.status(), 404);

        let e: RpcError = DispatchError::Package(PackageError::CapacityExceeded {
            warehouse: "warehouse_1".into(),
            stored: 2,
            capacity: 2,
        })
        .into();
        assert_eq!(e.kind(), "CapacityExceededError");
    }

    #[test]
    fn test_transport_failures_are_unavailable() {
        let e: RpcError =
            PlantError::ActorCommunicationError("Request timed out after 5s".into()).into();
        assert_eq!(e.status(), 503);
        assert_eq!(RpcError::UnauthorizedInternal.status(), 401);
        assert_eq!(RpcError::from(DispatchError::InvalidQuantity(0)).status(), 400);
    }
}
