//! Service health endpoints.

use axum::{Extension, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status, always "ok" while the process serves requests.
    pub status: &'static str,
    /// Application version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_secs: u64,
}

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    /// Always "alive".
    pub status: &'static str,
}

/// Service health and uptime.
///
/// There is no process-wide database connection to probe — sessions are
/// opened per request against whichever server the request names — so
/// health reflects only the process itself.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "Health"
)]
pub async fn healthz_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version.to_string(),
        uptime_secs: state.startup_time.elapsed().as_secs(),
    })
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/livez",
    responses((status = 200, description = "Process is alive", body = LivenessResponse)),
    tag = "Health"
)]
pub async fn livez_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}
