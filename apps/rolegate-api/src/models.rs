//! Request and response models for the provisioning API.
//!
//! Wire field names are PascalCase, matching the catalog join's column
//! labels (`MemberPrincipalName`, `RolePrincipalName`, ...).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use rolegate_core::{EnsureReport, RevokeReport, RoleMembership};

/// Role selector for the mutating endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleQuery {
    /// Name of the database role to grant or revoke.
    pub role_name: String,
}

/// One role membership row for the read path.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MembershipResponse {
    /// Name of the member principal (the group).
    pub member_principal_name: String,
    /// Name of the role principal.
    pub role_principal_name: String,
    /// Target server.
    pub server: String,
    /// Target database.
    pub database: String,
}

impl MembershipResponse {
    /// Build the wire row from a catalog join row and the request target.
    pub fn from_row(row: RoleMembership, server: &str, database: &str) -> Self {
        Self {
            member_principal_name: row.member_name,
            role_principal_name: row.role_name,
            server: server.to_string(),
            database: database.to_string(),
        }
    }
}

/// Result of the ensure-membership path.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GrantResponse {
    /// Name of the member principal (the group).
    pub member_principal_name: String,
    /// Name of the role principal.
    pub role_principal_name: String,
    /// Target server.
    pub server: String,
    /// Target database.
    pub database: String,
    /// True when everything was already in place and no statement was
    /// issued beyond the existence checks.
    pub already_exists: bool,
    /// Whether this request created the database user.
    pub user_created: bool,
    /// Whether this request added the role membership.
    pub membership_added: bool,
}

impl From<EnsureReport> for GrantResponse {
    fn from(report: EnsureReport) -> Self {
        let already_exists = report.already_exists();
        Self {
            member_principal_name: report.grant.member_name,
            role_principal_name: report.grant.role_name,
            server: report.grant.server,
            database: report.grant.database,
            already_exists,
            user_created: report.user_created,
            membership_added: report.membership_added,
        }
    }
}

/// Result of the membership-only update path.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RoleUpdateResponse {
    /// Name of the member principal (the group).
    pub member_principal_name: String,
    /// Name of the role principal.
    pub role_principal_name: String,
    /// Target server.
    pub server: String,
    /// Target database.
    pub database: String,
    /// `added` or `already_member`.
    pub outcome: String,
}

/// Result of the teardown path.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RevokeResponse {
    /// Name of the member principal (the group).
    pub member_principal_name: String,
    /// Name of the role principal.
    pub role_principal_name: String,
    /// Target server.
    pub server: String,
    /// Target database.
    pub database: String,
    /// True when there was nothing left to remove.
    pub already_absent: bool,
    /// Whether this request dropped the role membership.
    pub membership_dropped: bool,
    /// Whether this request dropped the database user.
    pub user_dropped: bool,
}

impl RevokeResponse {
    /// Build the wire response from a teardown report and the request
    /// target.
    pub fn new(
        report: RevokeReport,
        group: &str,
        role: &str,
        server: &str,
        database: &str,
    ) -> Self {
        Self {
            member_principal_name: group.to_string(),
            role_principal_name: role.to_string(),
            server: server.to_string(),
            database: database.to_string(),
            already_absent: report.already_absent(),
            membership_dropped: report.membership_dropped,
            user_dropped: report.user_dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::MembershipGrant;

    #[test]
    fn test_grant_response_wire_shape() {
        let report = EnsureReport {
            grant: MembershipGrant {
                member_name: "g1".to_string(),
                role_name: "db_accessadmin".to_string(),
                server: "sql01".to_string(),
                database: "billing".to_string(),
            },
            login_present: false,
            user_created: true,
            membership_added: true,
        };

        let json = serde_json::to_value(GrantResponse::from(report)).unwrap();
        assert_eq!(json["MemberPrincipalName"], "g1");
        assert_eq!(json["RolePrincipalName"], "db_accessadmin");
        assert_eq!(json["Server"], "sql01");
        assert_eq!(json["Database"], "billing");
        assert_eq!(json["AlreadyExists"], false);
    }

    #[test]
    fn test_membership_response_from_row() {
        let row = RoleMembership {
            role_principal_id: 7,
            role_name: "db_datareader".to_string(),
            member_principal_id: 12,
            member_name: "g1".to_string(),
        };
        let response = MembershipResponse::from_row(row, "sql01", "billing");
        assert_eq!(response.member_principal_name, "g1");
        assert_eq!(response.role_principal_name, "db_datareader");
    }
}
