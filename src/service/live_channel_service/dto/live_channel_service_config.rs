use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LiveChannelServiceConfig {
    /// Streaming endpoint; the credential is appended as a query
    /// parameter because the transport cannot carry custom headers.
    pub stream_url: String,
    pub backoff_floor: Duration,
    pub backoff_cap: Duration,
    /// Consecutive failed attempts after which reconnecting stops.
    pub max_reconnect_attempts: u32,
}
