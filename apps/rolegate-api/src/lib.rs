//! rolegate API library.
//!
//! HTTP façade over the reconciliation engine: request routing, error
//! mapping, configuration, and API documentation. The binary in
//! `main.rs` wires this together with the sqlx session factory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod router;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use router::app_router;
pub use state::AppState;
