//! The contract a domain type fulfils to live inside a [`ResourceActor`](crate::ResourceActor).
//!
//! `on_create` and `on_delete` default to `Ok(())`; everything else is required.

use crate::store::EntityStore;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A resource managed by one actor.
///
/// Hooks are async so they may call other actors through clients carried in `Context`.
/// The context is handed to `run()` rather than `new()`, so actors can be wired to each
/// other after all of them have been constructed.
///
/// An `Action` addresses one entity (`AdjustPotency` on a single plant). A `Command` sees the
/// whole store (`Harvest` the oldest N plants of a name) and runs without interleaving with
/// any other request to the same actor.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// `From<u32>` lets the store hand out sequential ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    type Create: Send + Sync + Debug;
    type Update: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Command: Send + Sync + Debug;
    type CommandResult: Send + Sync + Debug;

    /// Clients and settings the hooks need. `()` when there are none.
    type Context: Send + Sync;

    /// Travels boxed inside [`FrameworkError::EntityError`](crate::FrameworkError) and is
    /// recovered by the client with `downcast_entity`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity; validation that needs no other actor belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs before the entity is stored; an error discards it.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// An error keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// New entities created here must take their ids from [`EntityStore::allocate_id`].
    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::CommandResult, Self::Error>;
}
