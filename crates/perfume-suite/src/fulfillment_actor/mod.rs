//! # Fulfillment Actor
//!
//! The fulfillment orchestrator. Turns a [`ProductionRequest`](crate::model::ProductionRequest)
//! into finished perfumes by driving a [`FulfillmentRun`] through its stages, calling the plant
//! and perfume actors through the clients in its [`FulfillmentContext`].
//!
//! Runs are keyed: producing again under a committed key returns the same perfumes, and
//! producing again after a failure resumes the run where it stopped.
//!
//! ## Structure
//!
//! - [`plan`] - material need, potency normalization and round-robin allocation
//! - [`entity`] - the run state machine and its [`ActorEntity`](actor_framework::ActorEntity)
//!   implementation
//! - [`actions`] - [`FulfillmentCommand`]
//! - [`error`] - [`FulfillmentError`]

pub mod actions;
pub mod entity;
pub mod error;
pub mod plan;

pub use actions::*;
pub use error::*;

use crate::clients::{FulfillmentClient, PerfumeClient, PlantClient};
use crate::model::FulfillmentRun;
use actor_framework::ResourceActor;

/// Dependencies of the fulfillment actor, injected through `run()`.
#[derive(Clone)]
pub struct FulfillmentContext {
    pub plants: PlantClient,
    pub perfumes: PerfumeClient,
    /// Origin recorded on plants planted to cover a shortfall.
    pub default_origin: String,
}

/// Creates a new Fulfillment actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<FulfillmentRun>, FulfillmentClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, FulfillmentClient::new(generic_client))
}
