mod delivery_status;
mod notification;
mod push_payload;

pub use delivery_status::*;
pub use notification::*;
pub use push_payload::*;
