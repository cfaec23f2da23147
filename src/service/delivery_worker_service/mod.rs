mod delivery_worker;
mod delivery_worker_service;
mod dto;

pub use delivery_worker_service::*;
pub use dto::*;
