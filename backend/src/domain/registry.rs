//! User directory domain services.
//!
//! Implements the user command and query driving ports on top of the user
//! repository. Registration is idempotent on email: the first write wins and
//! later attempts surface the stored account instead of failing.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    RegisterUserRequest, RegisterUserResponse, RoleUpdateResponse, UserRepository,
    UserRepositoryError, UsersCommand, UsersQuery, invalid_user_payload,
};
use crate::domain::{EmailAddress, Error, Role, User, UserId, UserName};

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

/// User directory service implementing the user driving ports.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    user_repo: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new directory service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error> {
        let name = UserName::new(request.name).map_err(invalid_user_payload)?;
        let email = EmailAddress::new(request.email).map_err(invalid_user_payload)?;
        let user = User::new(UserId::random(), name, email, request.role);

        let created = self
            .user_repo
            .create_if_absent(&user)
            .await
            .map_err(map_repository_error)?;
        if created {
            return Ok(RegisterUserResponse {
                created: true,
                user,
            });
        }

        // Lost the insert race or the email was already taken; either way the
        // stored account is authoritative.
        let existing = self
            .user_repo
            .find_by_email(user.email())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "user {} reported as existing but could not be loaded",
                    user.email()
                ))
            })?;

        Ok(RegisterUserResponse {
            created: false,
            user: existing,
        })
    }

    async fn promote(&self, user_id: Uuid, role: Role) -> Result<RoleUpdateResponse, Error> {
        let updated = self
            .user_repo
            .set_role(&user_id, role)
            .await
            .map_err(map_repository_error)?;

        Ok(RoleUpdateResponse { updated })
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, Error> {
        self.user_repo
            .list_by_role(role)
            .await
            .map_err(map_repository_error)
    }

    async fn find_user(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_email(email)
            .await
            .map_err(map_repository_error)
    }

    async fn role_of(&self, email: &EmailAddress) -> Result<Role, Error> {
        Ok(self
            .find_user(email)
            .await?
            .map_or(Role::None, |user| user.role()))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
