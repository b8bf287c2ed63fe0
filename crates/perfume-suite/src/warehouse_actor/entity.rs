//! ActorEntity implementation for the Warehouse domain type.

use super::error::WarehouseError;
use crate::model::{Warehouse, WarehouseCreate, WarehouseId, WarehouseUpdate};
use actor_framework::{ActorEntity, EntityStore};
use async_trait::async_trait;

/// Warehouses only hold their own description; capacity is enforced by the package actor at
/// intake, so there are no collection commands beyond listing.
#[derive(Debug, Clone)]
pub enum WarehouseCommand {
    List,
}

#[async_trait]
impl ActorEntity for Warehouse {
    type Id = WarehouseId;
    type Create = WarehouseCreate;
    type Update = WarehouseUpdate;
    type Action = ();
    type ActionResult = ();
    type Command = WarehouseCommand;
    type CommandResult = Vec<Warehouse>;
    type Context = ();
    type Error = WarehouseError;

    fn from_create_params(id: WarehouseId, params: WarehouseCreate) -> Result<Self, Self::Error> {
        Warehouse::new(id, params)
    }

    async fn on_update(&mut self, update: WarehouseUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if update.capacity == Some(0) {
            return Err(WarehouseError::ValidationError("capacity must be at least 1".into()));
        }
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(WarehouseError::ValidationError(
            "warehouses have no per-warehouse actions".into(),
        ))
    }

    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: WarehouseCommand,
        _ctx: &(),
    ) -> Result<Vec<Warehouse>, Self::Error> {
        match command {
            WarehouseCommand::List => {
                let mut all: Vec<Warehouse> = store.values().cloned().collect();
                all.sort_by_key(|w| w.id);
                Ok(all)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north(capacity: u32) -> Warehouse {
        Warehouse::new(
            WarehouseId(1),
            WarehouseCreate {
                label: "North".into(),
                location: "Rotterdam".into(),
                capacity,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_rejects_zero_capacity() {
        let mut warehouse = north(4);
        let update = WarehouseUpdate {
            capacity: Some(0),
            ..Default::default()
        };
        let err = warehouse.on_update(update, &()).await.unwrap_err();
        assert!(matches!(err, WarehouseError::ValidationError(_)));
        assert_eq!(warehouse.capacity, 4);
    }

    #[tokio::test]
    async fn test_stray_action_is_reported() {
        let err = north(4).handle_action((), &()).await.unwrap_err();
        assert!(matches!(err, WarehouseError::ValidationError(_)));
    }
}
