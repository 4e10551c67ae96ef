//! Router assembly for the provisioning API.

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    grant_group_membership, list_group_memberships, revoke_group_membership, update_group_role,
};
use crate::health::{healthz_handler, livez_handler};
use crate::openapi::swagger_routes;
use crate::state::AppState;

/// Build the full application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/server/:server/database/:database/group/:group",
            get(list_group_memberships)
                .post(grant_group_membership)
                .put(update_group_role)
                .delete(revoke_group_membership),
        )
        .route("/healthz", get(healthz_handler))
        .route("/livez", get(livez_handler))
        .merge(swagger_routes())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
