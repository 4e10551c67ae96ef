//! Engine error types
//!
//! Error definitions with transient/permanent classification. All catalog
//! and provisioning failures are caught at the statement boundary and
//! converted into these values; nothing unwinds past the engine.

use thiserror::Error;

/// Error that can occur during catalog reads or provisioning statements.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to establish a session with the target server/database.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An identifier failed validation before statement interpolation.
    ///
    /// Raised before any SQL text is built; caller-supplied names are
    /// never interpolated raw.
    #[error("invalid identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A catalog read was rejected by the engine.
    #[error("catalog query failed: {message}")]
    Catalog {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A DDL/DML statement was rejected by the engine (duplicate name
    /// race, insufficient privilege, malformed statement).
    #[error("provisioning statement rejected: {message}")]
    Provisioning {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Engine configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl EngineError {
    /// Create a `ConnectionFailed` error without a source.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        EngineError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a `ConnectionFailed` error with an underlying driver error.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        EngineError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a `Catalog` error with an underlying driver error.
    pub fn catalog_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        EngineError::Catalog {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a `Provisioning` error without a source.
    pub fn provisioning(message: impl Into<String>) -> Self {
        EngineError::Provisioning {
            message: message.into(),
            source: None,
        }
    }

    /// Create a `Provisioning` error with an underlying driver error.
    pub fn provisioning_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        EngineError::Provisioning {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an `InvalidConfiguration` error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Check if this error is transient and the operation may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::ConnectionFailed { .. })
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            EngineError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            EngineError::Catalog { .. } => "CATALOG_QUERY_FAILED",
            EngineError::Provisioning { .. } => "PROVISIONING_REJECTED",
            EngineError::InvalidConfiguration { .. } => "INVALID_CONFIG",
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
