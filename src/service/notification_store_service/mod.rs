mod dto;
mod notification_store_service;
mod notification_store_service_impl;

pub use dto::*;
pub use notification_store_service::*;
pub use notification_store_service_impl::*;

/// Stored history is capped; inserting beyond evicts the oldest entries.
pub const HISTORY_CAP: usize = 50;
