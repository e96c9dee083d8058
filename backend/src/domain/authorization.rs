//! Role-based access decisions.
//!
//! Composed after credential verification: a [`Claim`] arriving here has
//! already passed signature and expiry checks, so only ownership and the
//! stored role remain to be decided.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RoleAuthorizer, UserRepository, UserRepositoryError};
use crate::domain::{Claim, EmailAddress, Error, Role};

/// Message returned whenever an access decision goes against the caller.
///
/// Deliberately uniform: the body never reveals whether the target account
/// exists or which role it holds.
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Reject callers addressing another user's resources.
///
/// Runs before any storage lookup so a cross-user probe learns nothing about
/// the target account. Emails are normalised at construction, making the
/// comparison case-insensitive.
pub fn require_self(claim: &Claim, target: &EmailAddress) -> Result<(), Error> {
    if claim.email() == target {
        Ok(())
    } else {
        Err(Error::forbidden(FORBIDDEN_MESSAGE))
    }
}

/// Authorizer backed by the stored user directory.
#[derive(Clone)]
pub struct RoleAuthorizerService<R> {
    user_repo: Arc<R>,
}

impl<R> RoleAuthorizerService<R> {
    /// Create a new authorizer with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> RoleAuthorizer for RoleAuthorizerService<R>
where
    R: UserRepository,
{
    async fn authorize(&self, claim: &Claim, required: Role) -> Result<(), Error> {
        let stored = self
            .user_repo
            .find_by_email(claim.email())
            .await
            .map_err(map_repository_error)?;

        // Missing accounts hold no role; the comparison below rejects them
        // for any required role other than `Role::None`.
        let role = stored.map_or(Role::None, |user| user.role());
        if role == required {
            Ok(())
        } else {
            Err(Error::forbidden(FORBIDDEN_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "authorization_tests.rs"]
mod tests;
