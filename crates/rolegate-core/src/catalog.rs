//! Catalog capability traits and row types.
//!
//! Capability-based trait definitions for catalog access. Readers are pure:
//! they never mutate and tolerate zero matching rows. Provisioners issue
//! single mutating statements and do not check existence themselves; the
//! check/act ordering is the workflow's responsibility, so it stays
//! explicit in one place.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::EngineResult;

/// One row of the role-membership join: the membership edge together with
/// the names of its role-side and member-side principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMembership {
    /// Principal id of the role.
    pub role_principal_id: i32,
    /// Name of the role.
    pub role_name: String,
    /// Principal id of the member.
    pub member_principal_id: i32,
    /// Name of the member.
    pub member_name: String,
}

/// Read-only queries against the engine's security catalog.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// True iff a server login with this name exists in `sys.sql_logins`.
    async fn login_exists(&self, name: &str) -> EngineResult<bool>;

    /// True iff a database principal with this name exists in
    /// `sys.database_principals`.
    async fn database_principal_exists(&self, name: &str) -> EngineResult<bool>;

    /// True iff `sys.database_role_members` holds an edge from the named
    /// role to the named member.
    async fn role_membership_exists(&self, member_name: &str, role_name: &str)
        -> EngineResult<bool>;

    /// All roles the named member belongs to. Empty when the member is
    /// unknown or has no memberships.
    async fn list_role_memberships(&self, member_name: &str) -> EngineResult<Vec<RoleMembership>>;
}

/// Mutating statements against the engine's security objects.
///
/// Each call issues exactly one statement with commit-per-statement
/// semantics. Callers must gate every call with the corresponding
/// [`CatalogReader`] check.
#[async_trait]
pub trait PrincipalProvisioner: Send + Sync {
    /// `CREATE USER <name> FOR LOGIN <name>` — the login and user share a
    /// name by convention (the group name).
    async fn create_database_user(&self, name: &str) -> EngineResult<()>;

    /// `DROP USER <name>`.
    async fn drop_database_user(&self, name: &str) -> EngineResult<()>;

    /// `ALTER ROLE <role> ADD MEMBER <member>`.
    async fn add_role_member(&self, role_name: &str, member_name: &str) -> EngineResult<()>;

    /// `ALTER ROLE <role> DROP MEMBER <member>`.
    async fn drop_role_member(&self, role_name: &str, member_name: &str) -> EngineResult<()>;
}

/// A full catalog session: reads plus guarded mutations, bound to one
/// target server/database for the lifetime of a request.
pub trait CatalogSession: CatalogReader + PrincipalProvisioner {}

impl<T: CatalogReader + PrincipalProvisioner> CatalogSession for T {}

/// Factory yielding a request-scoped session per (server, database) pair.
///
/// There is no process-wide connection; every request opens its own
/// session and drops it when done.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Open a session against one target server and database.
    async fn open(&self, server: &str, database: &str) -> EngineResult<Box<dyn CatalogSession>>;
}
