//! Group role-membership endpoint handlers.
//!
//! Each handler opens its own catalog session for the (server, database)
//! named in the path, runs the reconciliation workflow, and drops the
//! session when the request completes.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};

use rolegate_core::{Reconciler, RoleUpdateOutcome};

use crate::error::ApiError;
use crate::models::{
    GrantResponse, MembershipResponse, RevokeResponse, RoleQuery, RoleUpdateResponse,
};
use crate::state::AppState;

/// List the roles a group holds in the target database.
///
/// GET /server/:server/database/:database/group/:group
#[utoipa::path(
    get,
    path = "/server/{server}/database/{database}/group/{group}",
    params(
        ("server" = String, Path, description = "Target server"),
        ("database" = String, Path, description = "Target database"),
        ("group" = String, Path, description = "Group name"),
    ),
    responses(
        (status = 200, description = "Role memberships for the group", body = [MembershipResponse]),
        (status = 400, description = "Invalid group name"),
        (status = 404, description = "Group has no role memberships"),
        (status = 502, description = "Target server unreachable"),
    ),
    tag = "Memberships"
)]
pub async fn list_group_memberships(
    Extension(state): Extension<AppState>,
    Path((server, database, group)): Path<(String, String, String)>,
) -> Result<Json<Vec<MembershipResponse>>, ApiError> {
    let session = state.sessions.open(&server, &database).await?;
    let reconciler = Reconciler::new(session.as_ref(), &server, &database);

    let rows = reconciler.list_memberships(&group).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(
        rows.into_iter()
            .map(|row| MembershipResponse::from_row(row, &server, &database))
            .collect(),
    ))
}

/// Ensure the group is a member of the requested role, creating the
/// database user first when it is missing.
///
/// POST /server/:server/database/:database/group/:group?role_name=X
#[utoipa::path(
    post,
    path = "/server/{server}/database/{database}/group/{group}",
    params(
        ("server" = String, Path, description = "Target server"),
        ("database" = String, Path, description = "Target database"),
        ("group" = String, Path, description = "Group name"),
        RoleQuery,
    ),
    responses(
        (status = 201, description = "Membership provisioned", body = GrantResponse),
        (status = 200, description = "Membership already in place", body = GrantResponse),
        (status = 400, description = "Invalid group or role name"),
        (status = 500, description = "Provisioning statement rejected"),
        (status = 502, description = "Target server unreachable"),
    ),
    tag = "Memberships"
)]
pub async fn grant_group_membership(
    Extension(state): Extension<AppState>,
    Path((server, database, group)): Path<(String, String, String)>,
    Query(query): Query<RoleQuery>,
) -> Result<(StatusCode, Json<GrantResponse>), ApiError> {
    tracing::info!(
        server = %server,
        database = %database,
        group = %group,
        role = %query.role_name,
        "Ensuring role membership"
    );

    let session = state.sessions.open(&server, &database).await?;
    let reconciler = Reconciler::new(session.as_ref(), &server, &database);

    let report = reconciler.ensure_membership(&group, &query.role_name).await?;
    let status = if report.already_exists() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(GrantResponse::from(report))))
}

/// Add the role membership for a group whose database user already
/// exists. Unlike the POST path this never creates the user.
///
/// PUT /server/:server/database/:database/group/:group?role_name=X
#[utoipa::path(
    put,
    path = "/server/{server}/database/{database}/group/{group}",
    params(
        ("server" = String, Path, description = "Target server"),
        ("database" = String, Path, description = "Target database"),
        ("group" = String, Path, description = "Group name"),
        RoleQuery,
    ),
    responses(
        (status = 201, description = "Membership added", body = RoleUpdateResponse),
        (status = 200, description = "Already a member", body = RoleUpdateResponse),
        (status = 400, description = "Invalid group or role name"),
        (status = 404, description = "Group has no database principal"),
        (status = 502, description = "Target server unreachable"),
    ),
    tag = "Memberships"
)]
pub async fn update_group_role(
    Extension(state): Extension<AppState>,
    Path((server, database, group)): Path<(String, String, String)>,
    Query(query): Query<RoleQuery>,
) -> Result<(StatusCode, Json<RoleUpdateResponse>), ApiError> {
    let session = state.sessions.open(&server, &database).await?;
    let reconciler = Reconciler::new(session.as_ref(), &server, &database);

    let outcome = reconciler
        .update_role_membership(&group, &query.role_name)
        .await?;

    let (status, outcome) = match outcome {
        RoleUpdateOutcome::Added => (StatusCode::CREATED, "added"),
        RoleUpdateOutcome::AlreadyMember => (StatusCode::OK, "already_member"),
        RoleUpdateOutcome::UnknownPrincipal => return Err(ApiError::PrincipalNotFound),
    };

    Ok((
        status,
        Json(RoleUpdateResponse {
            member_principal_name: group,
            role_principal_name: query.role_name,
            server,
            database,
            outcome: outcome.to_string(),
        }),
    ))
}

/// Remove the group's role membership and its database user.
///
/// DELETE /server/:server/database/:database/group/:group?role_name=X
#[utoipa::path(
    delete,
    path = "/server/{server}/database/{database}/group/{group}",
    params(
        ("server" = String, Path, description = "Target server"),
        ("database" = String, Path, description = "Target database"),
        ("group" = String, Path, description = "Group name"),
        RoleQuery,
    ),
    responses(
        (status = 200, description = "Teardown report", body = RevokeResponse),
        (status = 400, description = "Invalid group or role name"),
        (status = 500, description = "Provisioning statement rejected"),
        (status = 502, description = "Target server unreachable"),
    ),
    tag = "Memberships"
)]
pub async fn revoke_group_membership(
    Extension(state): Extension<AppState>,
    Path((server, database, group)): Path<(String, String, String)>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<RevokeResponse>, ApiError> {
    tracing::info!(
        server = %server,
        database = %database,
        group = %group,
        role = %query.role_name,
        "Revoking role membership"
    );

    let session = state.sessions.open(&server, &database).await?;
    let reconciler = Reconciler::new(session.as_ref(), &server, &database);

    let report = reconciler
        .revoke_membership(&group, &query.role_name)
        .await?;

    Ok(Json(RevokeResponse::new(
        report, &group, &query.role_name, &server, &database,
    )))
}
