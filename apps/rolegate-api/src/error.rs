//! Error types for the provisioning API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use rolegate_core::EngineError;

/// Error type for the provisioning API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The group has no role memberships in the target database.
    #[error("No role memberships found for this group")]
    NotFound,

    /// The group has no database principal (membership-only update path).
    #[error("Database principal not found")]
    PrincipalNotFound,

    /// A caller-supplied name failed identifier validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target server/database could not be reached.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// The engine rejected a catalog query or provisioning statement.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidIdentifier { .. } => ApiError::Validation(err.to_string()),
            EngineError::ConnectionFailed { .. } => ApiError::Connection(err.to_string()),
            EngineError::Catalog { .. } | EngineError::Provisioning { .. } => {
                ApiError::Provisioning(err.to_string())
            }
            EngineError::InvalidConfiguration { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn problem(problem_type: &str, title: &str, status: StatusCode, detail: String) -> ProblemDetails {
    ProblemDetails {
        problem_type: format!("https://rolegate.io/problems/{problem_type}"),
        title: title.to_string(),
        status: status.as_u16(),
        detail: Some(detail),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                problem(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "No role memberships found for this group".to_string(),
                ),
            ),
            ApiError::PrincipalNotFound => (
                StatusCode::NOT_FOUND,
                problem(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "The group has no database principal in the target database".to_string(),
                ),
            ),
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                problem(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiError::Connection(msg) => {
                tracing::error!("Connection error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    problem(
                        "connection-error",
                        "Bad Gateway",
                        StatusCode::BAD_GATEWAY,
                        msg.clone(),
                    ),
                )
            }
            ApiError::Provisioning(msg) => {
                tracing::error!("Provisioning error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    problem(
                        "provisioning-error",
                        "Provisioning Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        msg.clone(),
                    ),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    problem(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
