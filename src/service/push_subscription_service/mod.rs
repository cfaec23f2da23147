mod push_api_client;
mod push_api_client_impl;
mod push_subscription_service;
mod push_subscription_service_impl;

pub use push_api_client::*;
pub use push_api_client_impl::*;
pub use push_subscription_service::*;
pub use push_subscription_service_impl::*;
