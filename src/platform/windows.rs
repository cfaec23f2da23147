use async_trait::async_trait;

///
/// Window management across the application's open windows. The
/// background worker and the foreground alerts both route clicks
/// through this seam.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WindowClients: Send + Sync {
    /// Whether any window of the application's origin is open.
    async fn has_app_window(&self) -> bool;

    /// Navigates an open application window to the route and focuses it.
    async fn navigate_and_focus(&self, route: &str);

    /// Opens a new window at the absolute url.
    async fn open_window(&self, url: &str);
}
