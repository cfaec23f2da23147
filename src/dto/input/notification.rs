use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

///
/// Client-visible unit of delivery.
///
/// Arrives either through the live channel (as an event-framed JSON
/// object) or through a push payload, possibly both for the same
/// logical notification. `id` is the deduplication key.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Sender-defined payload bag, forwarded opaquely to click routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Severity hint for styling, not a control value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_full_payload() {
        let payload = serde_json::json!({
            "id": "n1",
            "title": "Kamp fundet",
            "message": "Din makker har bekræftet",
            "type": "success",
            "route": "/matches/7",
            "link": "https://booking.example/court/2",
            "timestamp": "2026-08-28T18:30:00Z",
            "data": { "matchId": 7, "court": 2 },
        });

        let notification: Notification = serde_json::from_value(payload).unwrap();

        assert_eq!(notification.id, "n1");
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.route.as_deref(), Some("/matches/7"));
        assert_eq!(notification.data.unwrap()["matchId"], 7);
    }

    #[test]
    fn deserialize_minimal_payload_defaults_kind() {
        let payload = serde_json::json!({
            "id": "n2",
            "title": "T",
            "message": "M",
            "timestamp": "2026-08-28T18:30:00Z",
        });

        let notification: Notification = serde_json::from_value(payload).unwrap();

        assert_eq!(notification.kind, NotificationKind::Info);
        assert_eq!(notification.link, None);
        assert_eq!(notification.route, None);
        assert_eq!(notification.data, None);
    }

    #[test]
    fn deserialize_missing_id_rejected() {
        let payload = serde_json::json!({
            "title": "T",
            "message": "M",
            "timestamp": "2026-08-28T18:30:00Z",
        });

        let result = serde_json::from_value::<Notification>(payload);

        assert!(result.is_err());
    }
}
