#[derive(Debug, Clone)]
pub struct DeliveryWorkerConfig {
    /// Application origin used when a click has to open a new window.
    pub origin: String,
    pub icon: String,
    pub badge: String,
}
