mod push_subscription;
mod send_notification_request;

pub use push_subscription::*;
pub use send_notification_request::*;
