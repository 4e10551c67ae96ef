//! Connection settings for target servers.
//!
//! The server hostname and database name are supplied per request; these
//! settings hold everything else a session needs (credentials, port, SSL
//! mode, timeouts).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default port for the target database engine.
pub const DEFAULT_PORT: u16 = 1433;

fn default_connect_timeout() -> u64 {
    5
}

fn default_statement_timeout() -> u64 {
    30
}

/// SSL mode for database connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    /// No SSL.
    Disable,
    /// Use SSL if available, but don't require it.
    #[default]
    Prefer,
    /// Require SSL.
    Require,
}

impl SslMode {
    /// Get the string representation for connection strings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

impl std::str::FromStr for SslMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            other => Err(EngineError::invalid_configuration(format!(
                "unknown ssl mode '{other}' (expected disable, prefer, or require)"
            ))),
        }
    }
}

/// Settings applied to every session opened by a factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Username for authentication.
    pub username: String,

    /// Password for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Server port. Defaults to [`DEFAULT_PORT`] when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// SSL mode.
    #[serde(default)]
    pub ssl_mode: SslMode,

    /// Timeout for establishing a session, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Timeout applied to each statement, in seconds. Overrides the
    /// driver default.
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_secs: u64,
}

impl ConnectionSettings {
    /// Create settings with the given username and defaults elsewhere.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
            port: None,
            ssl_mode: SslMode::default(),
            connect_timeout_secs: default_connect_timeout(),
            statement_timeout_secs: default_statement_timeout(),
        }
    }

    /// Set the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set an explicit port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the SSL mode.
    #[must_use]
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Set the connect timeout in seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set the per-statement timeout in seconds.
    #[must_use]
    pub fn with_statement_timeout(mut self, secs: u64) -> Self {
        self.statement_timeout_secs = secs;
        self
    }

    /// Effective port, falling back to the engine default.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Validate the settings.
    pub fn validate(&self) -> EngineResult<()> {
        if self.username.is_empty() {
            return Err(EngineError::invalid_configuration("username is required"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(EngineError::invalid_configuration(
                "connect_timeout_secs must be at least 1",
            ));
        }
        if self.statement_timeout_secs == 0 {
            return Err(EngineError::invalid_configuration(
                "statement_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }

    /// Copy of the settings with the password masked, for logging.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut settings = self.clone();
        if settings.password.is_some() {
            settings.password = Some("***REDACTED***".to_string());
        }
        settings
    }
}
