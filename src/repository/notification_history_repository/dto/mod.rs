mod stored_notification;

pub use stored_notification::*;
