use crate::{
    dto::{input::DeliveryStatus, output::SendNotificationRequest},
    error::Error,
};
use async_trait::async_trait;

///
/// The single outward-facing API for requesting deliveries. Server
/// rejections are propagated as [Error::ServerRejected] and never
/// retried here; the caller decides what to show the user.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchService: Send + Sync {
    /// Asks the server to deliver to the named recipients.
    async fn send(&self, request: SendNotificationRequest) -> Result<(), Error>;

    /// Triggers a test delivery to a single user.
    async fn send_test(&self, username: &str) -> Result<(), Error>;

    /// Live-delivery status as seen by the server.
    async fn status(&self) -> Result<DeliveryStatus, Error>;
}
