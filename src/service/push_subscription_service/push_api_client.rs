use crate::{dto::output::PushSubscription, error::Error};
use async_trait::async_trait;

/// Server side of the push subscription lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushApiClient: Send + Sync {
    /// Fetches the server's public push key.
    async fn public_key(&self) -> Result<String, Error>;

    async fn register(&self, subscription: &PushSubscription) -> Result<(), Error>;

    async fn unregister(&self, endpoint: &str) -> Result<(), Error>;
}
