//! The server half of a resource: one task, one store, one request at a time.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::EntityStore;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns every entity of type `T`.
///
/// The actor owns the [`EntityStore`] and the receiving end of the channel. Each actor runs
/// in its own Tokio task and handles one message at a time, so the store needs no `Mutex`
/// and every message (including a whole collection command) is atomic with respect to the
/// others.
///
/// # Usage Pattern
///
/// `new()` returns the actor together with its client. Clone the client freely, then spawn
/// `run(context)` once every dependency the context needs exists.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Plant>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: allocates the next id from the store, calls `T::from_create_params`, runs
///   the `on_create` hook and inserts the entity. A failing hook leaves the store untouched.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **Update**: runs `on_update` on the stored entity and returns its new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Action**: runs `handle_action` on one entity.
/// * **Command**: runs `T::handle_command` with mutable access to the whole store.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: EntityStore<T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// `buffer_size` bounds the request channel; callers wait while it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: EntityStore::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Serves requests until every client has been dropped. `context` is lent to each hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = short_type_name::<T>();
        info!(entity_type, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            self.dispatch(request, &context, entity_type).await;
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Handles one request and answers it. A caller that went away is ignored.
    async fn dispatch(
        &mut self,
        request: ResourceRequest<T>,
        ctx: &T::Context,
        entity_type: &str,
    ) {
        match request {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let result = self.create(params, ctx).await;
                match &result {
                    Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                    Err(e) => warn!(entity_type, error = %e, "Create failed"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let result = self.update(&id, update, ctx).await;
                log_outcome(entity_type, &id, "Update", &result);
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let result = self.delete(&id, ctx).await;
                log_outcome(entity_type, &id, "Delete", &result);
                let _ = respond_to.send(result);
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let result = match self.store.get_mut(&id) {
                    Some(item) => item.handle_action(action, ctx).await.map_err(entity_error),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                log_outcome(entity_type, &id, "Action", &result);
                let _ = respond_to.send(result);
            }
            ResourceRequest::Command {
                command,
                respond_to,
            } => {
                debug!(entity_type, ?command, "Command");
                let result = T::handle_command(&mut self.store, command, ctx)
                    .await
                    .map_err(entity_error);
                match &result {
                    Ok(_) => info!(entity_type, size = self.store.len(), "Command ok"),
                    Err(e) => warn!(entity_type, error = %e, "Command failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }

    async fn create(
        &mut self,
        params: T::Create,
        ctx: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let id = self.store.allocate_id();
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(ctx).await.map_err(entity_error)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let item = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(update, ctx).await.map_err(entity_error)?;
        Ok(item.clone())
    }

    async fn delete(&mut self, id: &T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(ctx).await.map_err(entity_error)?;
        self.store.remove(id);
        Ok(())
    }
}

/// `Plant` rather than `perfume_suite::model::plant::Plant`.
fn short_type_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("Unknown")
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

fn log_outcome<Id: std::fmt::Display, R>(
    entity_type: &str,
    id: &Id,
    op: &str,
    result: &Result<R, FrameworkError>,
) {
    match result {
        Ok(_) => info!(entity_type, %id, op, "Ok"),
        Err(FrameworkError::NotFound(_)) => warn!(entity_type, %id, op, "Not found"),
        Err(e) => warn!(entity_type, %id, op, error = %e, "Failed"),
    }
}
