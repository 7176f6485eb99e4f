//! Wolt API Integration
//!
//! - Token refresh against the authentication API
//! - Active orders and order details (authenticated)
//! - Venue availability (anonymous)

mod adapter;
mod api_types;
mod config;
mod credentials;
mod http_client;

pub use adapter::WoltClient;
pub use config::{
    DEFAULT_AUTH_BASE_URL, DEFAULT_CONSUMER_BASE_URL, DEFAULT_HEADERS, DEFAULT_REQUEST_TIMEOUT,
    SESSION_ID_HEADER, WoltClientConfig, WoltEndpoints,
};
pub use credentials::{Credentials, TokenResponse, TokenRotation};
