use super::StoredNotification;
use crate::repository::Error;
use async_trait::async_trait;

///
/// Persisted notification history, one record per username. The record
/// is read once when the store switches to a user and overwritten as a
/// whole on every mutation.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationHistoryRepository: Send + Sync {
    /// Returns the user's stored history, empty when none exists yet.
    async fn load(&self, username: &str) -> Result<Vec<StoredNotification>, Error>;

    async fn store(
        &self,
        username: &str,
        notifications: &[StoredNotification],
    ) -> Result<(), Error>;
}
