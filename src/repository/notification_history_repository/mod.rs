mod dto;
mod notification_history_repository;
mod notification_history_repository_impl;

pub use dto::StoredNotification;
pub use notification_history_repository::*;
pub use notification_history_repository_impl::*;
