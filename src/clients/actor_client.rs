use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for widget-specific clients to inherit the standard read operations.
///
/// Provides default implementations for reading the actor's state so each
/// client only has to write its own commands.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The widget-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Read the state once every previously sent command has been applied.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// The last published snapshot.
    fn latest(&self) -> T::Snapshot {
        self.inner().latest()
    }

    /// Subscribe to published snapshots.
    fn subscribe(&self) -> watch::Receiver<T::Snapshot> {
        self.inner().subscribe()
    }
}
