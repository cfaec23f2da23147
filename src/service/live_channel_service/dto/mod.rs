mod channel_state;
mod connection_status;
mod live_channel_service_config;

pub use channel_state::*;
pub use connection_status::*;
pub use live_channel_service_config::*;
