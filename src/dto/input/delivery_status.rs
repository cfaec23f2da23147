use serde::Deserialize;

/// Live-delivery status reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatus {
    pub active_subscribers: u64,
    pub is_user_online: bool,
}
