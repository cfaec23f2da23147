use serde::Deserialize;

///
/// Body of a push event delivered to the background worker.
///
/// Every field is optional; the worker applies display defaults so a
/// sparse payload still renders a notification.
///
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
