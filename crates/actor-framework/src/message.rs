//! Requests carried over an actor's channel.
//!
//! Every request owns a oneshot sender; the actor answers on it exactly once.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Reply half of a request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// One unit of work for a [`ResourceActor`](crate::ResourceActor).
///
/// `Action` targets a single entity by id, `Command` sees the whole store. Being generic
/// over the entity keeps each actor's channel typed to its own payloads.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Command {
        command: T::Command,
        respond_to: Response<T::CommandResult>,
    },
}
