//! Reconciliation workflow over the catalog capability traits.
//!
//! Two idempotent terminal operations: ensure a group is a role member,
//! and tear the group's membership back down. Steps commit independently,
//! so a failure partway leaves partial state; every step is individually
//! existence-gated, and re-invoking the same operation completes whatever
//! is still missing.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{CatalogSession, RoleMembership};
use crate::error::EngineResult;
use crate::identifier;

/// Success record for a provisioned membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipGrant {
    /// Name of the member principal (the group).
    pub member_name: String,
    /// Name of the role principal.
    pub role_name: String,
    /// Target server.
    pub server: String,
    /// Target database.
    pub database: String,
}

/// Outcome of [`Reconciler::ensure_membership`].
#[derive(Debug, Clone, Serialize)]
pub struct EnsureReport {
    /// The reconciled membership.
    pub grant: MembershipGrant,
    /// Whether a server login with the group's name was already present.
    /// Login creation is always skipped for externally-provided groups;
    /// the flag is informational only and never short-circuits the
    /// database-level checks.
    pub login_present: bool,
    /// Whether this run created the database user.
    pub user_created: bool,
    /// Whether this run added the role membership edge.
    pub membership_added: bool,
}

impl EnsureReport {
    /// True when the run found everything already in place and issued no
    /// mutating statements.
    #[must_use]
    pub fn already_exists(&self) -> bool {
        !self.user_created && !self.membership_added
    }
}

/// Outcome of [`Reconciler::revoke_membership`].
#[derive(Debug, Clone, Serialize)]
pub struct RevokeReport {
    /// Whether this run dropped the role membership edge.
    pub membership_dropped: bool,
    /// Whether this run dropped the database user.
    pub user_dropped: bool,
}

impl RevokeReport {
    /// True when nothing was left to remove.
    #[must_use]
    pub fn already_absent(&self) -> bool {
        !self.membership_dropped && !self.user_dropped
    }
}

/// Outcome of the membership-only update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleUpdateOutcome {
    /// The membership edge was added.
    Added,
    /// The pair was already present.
    AlreadyMember,
    /// The group has no database principal to attach the role to.
    UnknownPrincipal,
}

/// Composes catalog reads and provisioning statements into the idempotent
/// high-level operations, bound to one session and target.
pub struct Reconciler<'a> {
    session: &'a dyn CatalogSession,
    server: &'a str,
    database: &'a str,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over an open session.
    pub fn new(session: &'a dyn CatalogSession, server: &'a str, database: &'a str) -> Self {
        Self {
            session,
            server,
            database,
        }
    }

    fn grant(&self, group: &str, role: &str) -> MembershipGrant {
        MembershipGrant {
            member_name: group.to_string(),
            role_name: role.to_string(),
            server: self.server.to_string(),
            database: self.database.to_string(),
        }
    }

    /// Bring `group` into `role`, creating the database user first when it
    /// is missing. Safe to re-invoke: each step is gated by a fresh
    /// catalog read, and a lost creation race is downgraded to
    /// already-existing when a re-read confirms the object is present.
    pub async fn ensure_membership(&self, group: &str, role: &str) -> EngineResult<EnsureReport> {
        identifier::validate(group)?;
        identifier::validate(role)?;

        let login_present = self.session.login_exists(group).await?;
        if login_present {
            // Group logins come from the external identity provider; the
            // login layer is observed, never written.
            debug!(group, "Server login already present, skipping login creation");
        }

        let mut user_created = false;
        if !self.session.database_principal_exists(group).await? {
            match self.session.create_database_user(group).await {
                Ok(()) => user_created = true,
                Err(err) => {
                    if self.session.database_principal_exists(group).await? {
                        info!(group, "Database user appeared concurrently, treating as existing");
                    } else {
                        return Err(err);
                    }
                }
            }
        }

        let mut membership_added = false;
        if !self.session.role_membership_exists(group, role).await? {
            match self.session.add_role_member(role, group).await {
                Ok(()) => membership_added = true,
                Err(err) => {
                    if self.session.role_membership_exists(group, role).await? {
                        info!(
                            group,
                            role, "Role membership appeared concurrently, treating as existing"
                        );
                    } else {
                        return Err(err);
                    }
                }
            }
        }

        info!(
            group,
            role,
            server = %self.server,
            database = %self.database,
            user_created,
            membership_added,
            "Membership reconciled"
        );

        Ok(EnsureReport {
            grant: self.grant(group, role),
            login_present,
            user_created,
            membership_added,
        })
    }

    /// Add `group` to `role` without creating the database user. Returns
    /// [`RoleUpdateOutcome::UnknownPrincipal`] when the group has no
    /// database principal.
    pub async fn update_role_membership(
        &self,
        group: &str,
        role: &str,
    ) -> EngineResult<RoleUpdateOutcome> {
        identifier::validate(group)?;
        identifier::validate(role)?;

        if !self.session.database_principal_exists(group).await? {
            return Ok(RoleUpdateOutcome::UnknownPrincipal);
        }
        if self.session.role_membership_exists(group, role).await? {
            return Ok(RoleUpdateOutcome::AlreadyMember);
        }

        match self.session.add_role_member(role, group).await {
            Ok(()) => Ok(RoleUpdateOutcome::Added),
            Err(err) => {
                if self.session.role_membership_exists(group, role).await? {
                    Ok(RoleUpdateOutcome::AlreadyMember)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Remove the membership edge and then the database user, skipping
    /// whichever is already absent.
    pub async fn revoke_membership(&self, group: &str, role: &str) -> EngineResult<RevokeReport> {
        identifier::validate(group)?;
        identifier::validate(role)?;

        let mut membership_dropped = false;
        if self.session.role_membership_exists(group, role).await? {
            self.session.drop_role_member(role, group).await?;
            membership_dropped = true;
        }

        let mut user_dropped = false;
        if self.session.database_principal_exists(group).await? {
            self.session.drop_database_user(group).await?;
            user_dropped = true;
        }

        info!(
            group,
            role,
            server = %self.server,
            database = %self.database,
            membership_dropped,
            user_dropped,
            "Membership revoked"
        );

        Ok(RevokeReport {
            membership_dropped,
            user_dropped,
        })
    }

    /// All roles the group belongs to in the target database.
    pub async fn list_memberships(&self, group: &str) -> EngineResult<Vec<RoleMembership>> {
        identifier::validate(group)?;
        self.session.list_role_memberships(group).await
    }
}
