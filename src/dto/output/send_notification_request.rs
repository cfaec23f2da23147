use crate::dto::input::NotificationKind;
use serde::Serialize;

///
/// Request to deliver a notification to one or more named recipients.
/// An empty recipient list asks the server to broadcast.
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub recipients: Vec<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestDeliveryRequest {
    pub username: String,
}
