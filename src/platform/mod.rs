//! Seams towards the hosting platform (browser shell or test harness).
//!
//! The delivery pipeline never talks to permission prompts, push
//! registrations, system notifications or window management directly;
//! it goes through these traits and the embedder supplies the
//! implementations.

mod credentials;
mod display;
mod permissions;
mod push_registration;
mod windows;

pub use credentials::*;
pub use display::*;
pub use permissions::*;
pub use push_registration::*;
pub use windows::*;
