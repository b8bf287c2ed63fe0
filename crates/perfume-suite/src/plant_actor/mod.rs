//! # Plant Actor
//!
//! The resource lifecycle manager: owns every plant from planting to harvest.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Plant`]
//! - [`error`] - [`PlantError`] type for type-safe error handling
//! - [`actions`] - [`PlantAction`] for single plants, [`PlantCommand`] for FIFO selection
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, plants) = plant_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! plants.plant_batch(template, 12).await?;
//! let units = plants.harvest("Rose", 12).await?;
//! ```
//!
//! ## Key Features
//!
//! - **FIFO**: harvests and reservations take the oldest plants first
//! - **All or nothing**: a harvest or reservation that cannot be met changes nothing
//! - **Reservations**: a fulfillment run holds its plants under its key until it harvests
//!   or releases them

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PlantClient;
use crate::model::Plant;
use actor_framework::ResourceActor;

/// Creates a new Plant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Plant>, PlantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PlantClient::new(generic_client))
}
