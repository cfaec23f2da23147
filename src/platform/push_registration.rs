use crate::{dto::output::PushSubscription, error::Error};
use async_trait::async_trait;

///
/// Browser side of the push subscription lifecycle: the background
/// worker registration and the subscription credential it owns.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushRegistration: Send + Sync {
    /// Registers the background worker if needed and waits until it is active.
    async fn ensure_worker_active(&self) -> Result<(), Error>;

    async fn existing_subscription(&self) -> Result<Option<PushSubscription>, Error>;

    /// Creates a new subscription against the server's public push key.
    async fn create_subscription(&self, server_key: &str) -> Result<PushSubscription, Error>;

    /// Removes the subscription at the browser level. Returns false when
    /// there was nothing to remove.
    async fn remove_subscription(&self) -> Result<bool, Error>;
}
