//! # Warehouse Actor
//!
//! Capacity-bound holding locations. The simplest actor in the suite: plain CRUD with
//! validation, no dependencies (`Context = ()`).

pub mod entity;
pub mod error;

pub use entity::WarehouseCommand;
pub use error::*;

use crate::clients::WarehouseClient;
use crate::model::Warehouse;
use actor_framework::ResourceActor;

/// Creates a new Warehouse actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Warehouse>, WarehouseClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, WarehouseClient::new(generic_client))
}
