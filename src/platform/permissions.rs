use async_trait::async_trait;

/// Tri-state display permission as exposed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PermissionState {
    /// Undecided, prompting is allowed.
    Default,
    Granted,
    Denied,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPermissions: Send + Sync {
    /// Current state without prompting.
    fn state(&self) -> PermissionState;

    ///
    /// Shows the modal permission prompt and returns the user's answer.
    ///
    /// Callers must check [state](NotificationPermissions::state) first;
    /// prompting an already decided permission is a platform error.
    ///
    async fn prompt(&self) -> PermissionState;
}
