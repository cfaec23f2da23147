use crate::platform::PermissionState;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSubscriptionService: Send + Sync {
    ///
    /// Returns the decided permission, prompting only while undecided.
    /// An already granted or denied permission is returned as-is
    /// without showing a dialog.
    ///
    async fn request_permission(&self) -> PermissionState;

    ///
    /// Idempotent: an existing subscription is reused, never duplicated
    /// server-side. Returns false on any failure (denied permission,
    /// registration failure, network failure) and never errors.
    ///
    async fn subscribe(&self) -> bool;

    ///
    /// Removes the browser subscription; the server is told best-effort.
    /// Returns false when there was no subscription to remove.
    ///
    async fn unsubscribe(&self) -> bool;
}
