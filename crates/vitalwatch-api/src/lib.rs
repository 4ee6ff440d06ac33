// vitalwatch-api: Async Rust client for the VitalWatch health-monitoring REST API

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

mod alerts;
mod dashboard;
mod devices;
mod health;
mod session;
mod users;

pub use auth::{StaticToken, TokenSource};
pub use client::ApiClient;
pub use endpoint::{Endpoint, HttpMethod, ResponseShape};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
