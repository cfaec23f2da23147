use crate::platform::NotificationAction;

///
/// Serialized event queue between the platform and the background
/// worker. The worker shares no memory with the page; everything it
/// learns arrives as one of these.
///
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Raw push payload bytes, expected to hold a JSON document.
    Push(Vec<u8>),
    /// User clicked the notification; [None] is the default (body) click.
    Click {
        tag: String,
        action: Option<NotificationAction>,
    },
    /// Notification dismissed without a click.
    Closed { tag: String },
}
