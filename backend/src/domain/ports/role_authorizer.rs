//! Driving port for role-based access checks.
//!
//! Composed after credential verification: the claim is already trusted and
//! only the stored role is consulted here.

use async_trait::async_trait;

use crate::domain::{Claim, Error, Role};

/// Port deciding whether a verified caller may proceed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleAuthorizer: Send + Sync {
    /// Check the caller's stored role against the required role.
    ///
    /// Fails with a forbidden error when the account is missing or holds a
    /// different role. Exact match only: admins are not implicitly
    /// instructors.
    async fn authorize(&self, claim: &Claim, required: Role) -> Result<(), Error>;
}

/// Fixture authorizer that admits every verified caller.
///
/// Useful for handler tests that exercise routing rather than access
/// control.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleAuthorizer;

#[async_trait]
impl RoleAuthorizer for FixtureRoleAuthorizer {
    async fn authorize(&self, _claim: &Claim, _required: Role) -> Result<(), Error> {
        Ok(())
    }
}
