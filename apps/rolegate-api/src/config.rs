//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present
//! and valid, or the application exits with a clear error message.

use std::env;

use thiserror::Error;

use rolegate_core::{ConnectionSettings, SslMode};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,

    /// Bind port for the HTTP server.
    pub port: u16,

    /// Log filter directive.
    pub rust_log: String,

    /// Connection settings applied to every catalog session.
    pub connection: ConnectionSettings,
}

fn parse_var<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `DB_USERNAME` is required; everything else falls back to a default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var::<u16>("PORT")?.unwrap_or(8080);
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let username = env::var("DB_USERNAME")
            .map_err(|_| ConfigError::MissingVar("DB_USERNAME".to_string()))?;

        let mut connection = ConnectionSettings::new(username);
        if let Ok(password) = env::var("DB_PASSWORD") {
            connection = connection.with_password(password);
        }
        if let Some(db_port) = parse_var::<u16>("DB_PORT")? {
            connection = connection.with_port(db_port);
        }
        if let Some(ssl_mode) = parse_var::<SslMode>("DB_SSL_MODE")? {
            connection = connection.with_ssl_mode(ssl_mode);
        }
        if let Some(secs) = parse_var::<u64>("DB_CONNECT_TIMEOUT_SECS")? {
            connection = connection.with_connect_timeout(secs);
        }
        if let Some(secs) = parse_var::<u64>("DB_STATEMENT_TIMEOUT_SECS")? {
            connection = connection.with_statement_timeout(secs);
        }

        connection
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                var: "DB_*".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            host,
            port,
            rust_log,
            connection,
        })
    }
}
