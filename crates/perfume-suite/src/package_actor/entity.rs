//! ActorEntity implementation for the Package domain type.

use super::actions::{PackageCommand, PackageCommandResult};
use super::error::PackageError;
use crate::model::{
    Package, PackageCreate, PackageId, PackageStatus, PackageUpdate, Warehouse, WarehouseId,
};
use actor_framework::{ActorEntity, EntityStore};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Package {
    type Id = PackageId;
    type Create = PackageCreate;
    type Update = PackageUpdate;
    type Action = ();
    type ActionResult = ();
    type Command = PackageCommand;
    type CommandResult = PackageCommandResult;
    type Context = ();
    type Error = PackageError;

    /// Packages created directly start PACKED, outside any warehouse.
    fn from_create_params(id: PackageId, params: PackageCreate) -> Result<Self, Self::Error> {
        Package::new(id, params)
    }

    async fn on_update(&mut self, update: PackageUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if self.status == PackageStatus::Delivered {
            return Err(PackageError::ValidationError(format!(
                "{} is already delivered",
                self.id
            )));
        }
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(sender_address) = update.sender_address {
            self.sender_address = sender_address;
        }
        Ok(())
    }

    /// Removing a stored package would free warehouse capacity behind the dispatch engine.
    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(PackageError::ValidationError(format!("{} cannot be deleted", self.id)))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(PackageError::ValidationError(
            "packages have no per-package actions".into(),
        ))
    }

    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: PackageCommand,
        _ctx: &(),
    ) -> Result<PackageCommandResult, Self::Error> {
        match command {
            PackageCommand::Intake { warehouse, package } => {
                ensure_room(store, &warehouse)?;
                let id = store.allocate_id();
                let mut created = Package::new(id, package)?;
                created.advance(PackageStatus::Stored)?;
                created.warehouse_id = Some(warehouse.id);
                store.insert(id, created.clone());
                info!(%id, warehouse = %warehouse.id, "Package taken in");
                Ok(PackageCommandResult::Intake(created))
            }
            PackageCommand::Store { warehouse, id } => {
                ensure_room(store, &warehouse)?;
                let package = store
                    .get_mut(&id)
                    .ok_or_else(|| PackageError::NotFound(id.to_string()))?;
                package.advance(PackageStatus::Stored)?;
                package.warehouse_id = Some(warehouse.id);
                info!(%id, warehouse = %warehouse.id, "Package stored");
                Ok(PackageCommandResult::Store(package.clone()))
            }
            PackageCommand::StoredCount { warehouse } => {
                Ok(PackageCommandResult::StoredCount(stored_in(store, warehouse)))
            }
            PackageCommand::Claim { quantity, ticket } => {
                let mut ids: Vec<PackageId> = store
                    .values()
                    .filter(|p| p.is_dispatchable())
                    .map(|p| p.id)
                    .collect();
                ids.sort_unstable();
                ids.truncate(quantity);
                for id in &ids {
                    if let Some(package) = store.get_mut(id) {
                        package.claimed_by = Some(ticket.clone());
                    }
                }
                debug!(%ticket, quantity, claimed = ids.len(), "Packages claimed");
                Ok(PackageCommandResult::Claim(ids))
            }
            PackageCommand::Deliver { ticket, ids } => {
                // Check the whole batch before changing any of it.
                for id in &ids {
                    let package = store
                        .get(id)
                        .ok_or_else(|| PackageError::NotFound(id.to_string()))?;
                    if package.claimed_by.as_ref() != Some(&ticket) {
                        return Err(PackageError::NotClaimed {
                            id: id.to_string(),
                            ticket: ticket.to_string(),
                        });
                    }
                }
                let mut delivered = Vec::with_capacity(ids.len());
                for id in &ids {
                    if let Some(package) = store.get_mut(id) {
                        package.advance(PackageStatus::Delivered)?;
                        package.claimed_by = None;
                        delivered.push(package.clone());
                    }
                }
                info!(%ticket, count = delivered.len(), "Batch delivered");
                Ok(PackageCommandResult::Deliver(delivered))
            }
            PackageCommand::ReleaseClaim { ticket } => {
                let mut released = 0;
                for package in store
                    .values_mut()
                    .filter(|p| p.claimed_by.as_ref() == Some(&ticket))
                {
                    package.claimed_by = None;
                    released += 1;
                }
                info!(%ticket, released, "Claim released");
                Ok(PackageCommandResult::ReleaseClaim(released))
            }
        }
    }
}

fn stored_in(store: &EntityStore<Package>, warehouse: WarehouseId) -> u32 {
    store.values().filter(|p| p.is_stored_in(warehouse)).count() as u32
}

fn ensure_room(store: &EntityStore<Package>, warehouse: &Warehouse) -> Result<(), PackageError> {
    let stored = stored_in(store, warehouse.id);
    if stored >= warehouse.capacity {
        return Err(PackageError::CapacityExceeded {
            warehouse: warehouse.id.to_string(),
            stored,
            capacity: warehouse.capacity,
        });
    }
    Ok(())
}
