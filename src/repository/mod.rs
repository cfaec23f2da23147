mod error;
mod notification_history_repository;

pub use error::*;
pub use notification_history_repository::*;
