use crate::{dto::input::Notification, repository::StoredNotification};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationStoreService: Send + Sync {
    ///
    /// Switches to another user's history, replacing the in-memory list
    /// with that user's persisted record (empty when none). [None] means
    /// no authenticated user; nothing is persisted in that state.
    ///
    async fn set_user<'a>(&self, username: Option<&'a str>);

    ///
    /// Inserts at the front and persists. A duplicate `id` is a no-op:
    /// the existing entry is preserved, not overwritten. While display
    /// permission is granted a transient foreground alert is shown.
    ///
    async fn record(&self, notification: Notification);

    async fn mark_as_read(&self, id: &str);

    async fn mark_all_as_read(&self);

    /// Local-only deletion; server-side history is unaffected.
    async fn remove(&self, id: &str);

    async fn clear(&self);

    /// Derived from the current list on each call.
    async fn unread_count(&self) -> usize;

    /// Current list, newest first.
    async fn notifications(&self) -> Vec<StoredNotification>;
}
