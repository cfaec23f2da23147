mod delivery_worker_config;
mod worker_event;

pub use delivery_worker_config::*;
pub use worker_event::*;
