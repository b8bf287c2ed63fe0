//! Collection commands for the Package actor.
//!
//! Capacity checks and FIFO selection each read and write in a single message, so concurrent
//! intakes cannot overfill a warehouse and concurrent dispatches cannot pick the same package.

use crate::model::{DispatchTicket, Package, PackageCreate, PackageId, Warehouse, WarehouseId};

#[derive(Debug, Clone)]
pub enum PackageCommand {
    /// Creates a package directly in STORED state, if `warehouse` has room.
    Intake {
        warehouse: Warehouse,
        package: PackageCreate,
    },
    /// Moves a PACKED package into `warehouse`, if it has room.
    Store { warehouse: Warehouse, id: PackageId },
    StoredCount { warehouse: WarehouseId },
    /// Claims up to `quantity` dispatchable packages, lowest id first.
    Claim {
        quantity: usize,
        ticket: DispatchTicket,
    },
    /// Marks claimed packages DELIVERED.
    Deliver {
        ticket: DispatchTicket,
        ids: Vec<PackageId>,
    },
    /// Drops whatever `ticket` still holds.
    ReleaseClaim { ticket: DispatchTicket },
}

/// Results from PackageCommands - variants match 1:1 with PackageCommand
#[derive(Debug, Clone, PartialEq)]
pub enum PackageCommandResult {
    Intake(Package),
    Store(Package),
    StoredCount(u32),
    Claim(Vec<PackageId>),
    Deliver(Vec<Package>),
    ReleaseClaim(u32),
}
