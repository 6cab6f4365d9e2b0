use crate::framework::{ActorEntity, FrameworkError, ResourceClient, Snapshot};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get` and `list`.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::Error::from)
    }

    /// Fetch the whole collection, newest first.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Snapshot<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::Error::from)
    }
}
