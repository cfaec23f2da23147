use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotificationStoreServiceConfig {
    pub origin: String,
    pub icon: String,
    pub badge: String,
    /// How long a foreground alert stays before auto-dismissing.
    pub transient_alert_lifetime: Duration,
}
