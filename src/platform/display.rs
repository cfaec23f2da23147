use async_trait::async_trait;
use std::{future::Future, pin::Pin, sync::Arc};

/// Callback invoked when the user clicks a displayed notification.
pub type DisplayCallback =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// User actions attached to a system notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationAction {
    Open,
    Close,
}

///
/// A system notification to render. Showing a second request with the
/// same `tag` replaces the first instead of stacking a new one.
///
#[derive(Clone)]
pub struct DisplayRequest {
    pub tag: String,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub category: String,
    /// Persist until dismissed instead of auto-hiding.
    pub require_interaction: bool,
    pub vibration: Vec<u32>,
    pub actions: Vec<NotificationAction>,
    pub on_click: Option<DisplayCallback>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDisplay: Send + Sync {
    async fn show(&self, request: DisplayRequest);

    /// Closes the notification with the given tag, if still shown.
    async fn close(&self, tag: &str);
}
