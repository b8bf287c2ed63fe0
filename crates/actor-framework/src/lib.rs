//! # Actor Framework
//!
//! Foundational building blocks for type-safe, concurrent actor systems. It implements a
//! **Resource-Oriented Architecture (ROA)** on top of the **Actor Model**: every resource type
//! gets its own actor with isolated state, and resources that need to coordinate talk to each
//! other through typed clients instead of shared memory.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your business logic and domain models
//! 2. **Runtime Layer** ([`ResourceActor`], [`EntityStore`]) - Message processing, state and id allocation
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication with optional timeouts
//!
//! ## Requests
//!
//! Besides CRUD, an entity can define two kinds of custom requests:
//!
//! - **Actions** operate on a single entity addressed by id.
//! - **Commands** operate on the whole [`EntityStore`]. They are how an actor answers
//!   "select the oldest N matching entities and mark them" as one atomic step, because the
//!   actor handles nothing else while the command runs.
//!
//! ```rust,ignore
//! // Per-entity action
//! let plant = plants.perform_action(id, PlantAction::AdjustPotency(65)).await?;
//!
//! // Collection command
//! let harvested = plants.execute(PlantCommand::Harvest { name, count: 12 }).await?;
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! This "late binding" lets one actor hold clients of actors created alongside it:
//!
//! ```rust,ignore
//! let (plant_actor, plant_client) = ResourceActor::<Plant>::new(32);
//! let (run_actor, run_client) = ResourceActor::<FulfillmentRun>::new(32);
//!
//! tokio::spawn(plant_actor.run(()));
//! tokio::spawn(run_actor.run(FulfillmentContext { plants: plant_client.clone(), .. }));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed!)
//! - Multiple actors run in **parallel**
//! - A client may carry a fixed timeout; there are no retries
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from queued expectations, so logic
//! that calls an actor can be tested without spawning it. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::EntityStore;
