//! Shared read/remove surface for the typed clients (`PlantClient`, `PackageClient`, ...).
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by every domain client that wraps a [`ResourceClient`].
///
/// A client supplies its inner handle and an error mapping; `get` and `delete` then come
/// for free and report failures in the client's own error type.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Plant> for PlantClient {
///     type Error = PlantError;
///
///     fn inner(&self) -> &ResourceClient<Plant> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> PlantError {
///         e.downcast_entity::<PlantError>()
///             .unwrap_or_else(|e| PlantError::ActorCommunicationError(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Turns a transport or entity failure into `Self::Error`.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// `Ok(None)` when no entity has this id.
    #[tracing::instrument(skip(self), fields(op = "get"))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        let found = self.inner().get(id).await.map_err(Self::map_error)?;
        tracing::trace!(found = found.is_some());
        Ok(found)
    }

    #[tracing::instrument(skip(self), fields(op = "delete"))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
