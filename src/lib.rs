pub mod application;
pub mod dto;
pub mod error;
pub mod navigation;
pub mod platform;
pub mod repository;
pub mod service;

pub use error::Error;
