//! Request handlers for the provisioning API.

pub mod memberships;

pub use memberships::{
    grant_group_membership, list_group_memberships, revoke_group_membership, update_group_role,
};
