use crate::package_actor::PackageError;
use crate::warehouse_actor::WarehouseError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Requested quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Unknown dispatch role: {0}")]
    UnknownRole(String),

    #[error("Dispatch task ended abnormally: {0}")]
    Interrupted(String),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Package(#[from] PackageError),
}
