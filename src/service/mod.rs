pub mod delivery_worker_service;
pub mod dispatch_service;
pub mod live_channel_service;
pub mod notification_store_service;
pub mod push_subscription_service;
