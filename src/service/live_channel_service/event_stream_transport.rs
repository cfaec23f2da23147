use crate::error::Error;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// One-directional stream of event frames, each frame one JSON document.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<String, Error>> + Send>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStreamTransport: Send + Sync {
    ///
    /// Opens the stream. The returned stream yields frames until the
    /// connection is lost; a terminal transport error is reported as
    /// one `Err` item or the end of the stream.
    ///
    async fn open(&self, url: &str) -> Result<EventStream, Error>;
}
