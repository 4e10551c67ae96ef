//! # Role Membership Reconciliation Engine
//!
//! Core engine for provisioning security principals (group logins, database
//! users, role memberships) inside a relational database engine.
//!
//! The engine reconciles three catalog views (`sys.sql_logins`,
//! `sys.database_principals`, `sys.database_role_members`) to bring a named
//! group into a target role. Every mutating statement is gated by an
//! existence check against the live catalog, so re-running a workflow never
//! raises a duplicate-object error and never skips a missing step.
//!
//! ## Example
//!
//! ```ignore
//! use rolegate_core::{ConnectionSettings, Reconciler, SessionFactory, SqlSessionFactory};
//!
//! let settings = ConnectionSettings::new("provisioner")
//!     .with_password("secret")
//!     .with_statement_timeout(30);
//!
//! let factory = SqlSessionFactory::new(settings)?;
//! let session = factory.open("sql01.corp.example", "billing").await?;
//!
//! let reconciler = Reconciler::new(session.as_ref(), "sql01.corp.example", "billing");
//! let report = reconciler.ensure_membership("CORP\\Data Readers", "db_datareader").await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod identifier;
pub mod session;
pub mod workflow;

// Re-exports
pub use catalog::{CatalogReader, CatalogSession, PrincipalProvisioner, RoleMembership, SessionFactory};
pub use config::{ConnectionSettings, SslMode};
pub use error::{EngineError, EngineResult};
pub use session::{SqlSession, SqlSessionFactory};
pub use workflow::{EnsureReport, MembershipGrant, Reconciler, RevokeReport, RoleUpdateOutcome};
