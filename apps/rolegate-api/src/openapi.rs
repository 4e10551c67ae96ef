//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ProblemDetails;
use crate::health::{HealthResponse, LivenessResponse};
use crate::models::{GrantResponse, MembershipResponse, RevokeResponse, RoleUpdateResponse};

/// `OpenAPI` documentation for the provisioning API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rolegate API",
        version = "0.1.0",
        description = "Idempotent provisioning of database role memberships for directory groups"
    ),
    paths(
        crate::handlers::memberships::list_group_memberships,
        crate::handlers::memberships::grant_group_membership,
        crate::handlers::memberships::update_group_role,
        crate::handlers::memberships::revoke_group_membership,
        crate::health::healthz_handler,
        crate::health::livez_handler,
    ),
    components(schemas(
        MembershipResponse,
        GrantResponse,
        RoleUpdateResponse,
        RevokeResponse,
        ProblemDetails,
        HealthResponse,
        LivenessResponse,
    )),
    tags(
        (name = "Memberships", description = "Group role-membership provisioning"),
        (name = "Health", description = "Service health and status"),
    )
)]
pub struct ApiDoc;

/// Router serving Swagger UI at `/docs` and the spec at
/// `/api-doc/openapi.json`.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}
