mod notification_store_service_config;

pub use notification_store_service_config::*;
