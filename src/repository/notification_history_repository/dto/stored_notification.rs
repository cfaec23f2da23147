use crate::dto::input::Notification;
use serde::{Deserialize, Serialize};

///
/// A notification as kept in the per-user history: the delivered
/// payload plus the client-only read flag.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNotification {
    #[serde(flatten)]
    pub notification: Notification,
    #[serde(default)]
    pub read: bool,
}
