use super::ConnectionStatus;
use crate::dto::input::Notification;
use async_trait::async_trait;
use tokio::sync::broadcast;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveChannelService: Send + Sync {
    ///
    /// Establishes the stream with the current credential. No-op while a
    /// connection is open or in progress. Without a credential the call
    /// reports `disconnected` and returns; no retry loop is started.
    ///
    async fn connect(&self);

    ///
    /// Idempotent teardown, safe from any state including never
    /// connected. Reports `disconnected` at most once.
    ///
    async fn disconnect(&self);

    /// Point-in-time read of the transport state.
    fn is_connected(&self) -> bool;

    /// Events are delivered in the order received from the transport.
    fn subscribe_notifications(&self) -> broadcast::Receiver<Notification>;

    fn subscribe_status(&self) -> broadcast::Receiver<ConnectionStatus>;
}
