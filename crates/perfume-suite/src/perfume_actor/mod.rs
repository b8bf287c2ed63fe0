//! # Perfume Actor
//!
//! Stores finished perfumes. Batches arrive from fulfillment runs through
//! [`PerfumeCommand::Assemble`]; nothing changes a perfume after that.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PerfumeClient;
use crate::model::Perfume;
use actor_framework::ResourceActor;

/// Creates a new Perfume actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Perfume>, PerfumeClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PerfumeClient::new(generic_client))
}
