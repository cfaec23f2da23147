mod dto;
mod event_stream_transport;
mod live_channel_service;
mod live_channel_service_impl;
mod sse_transport;

pub use dto::*;
pub use event_stream_transport::*;
pub use live_channel_service::*;
pub use live_channel_service_impl::*;
pub use sse_transport::*;
