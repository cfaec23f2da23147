use serde::{Deserialize, Serialize};

///
/// Browser-issued push credential, registered with the server as-is.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: PushSubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Body of the unregister call; the endpoint identifies the subscription.
#[derive(Debug, Clone, Serialize)]
pub struct UnregisterPushRequest {
    pub endpoint: String,
}
