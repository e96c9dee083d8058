//! Driving port for user account mutations.
//!
//! Registration is idempotent on email: re-registering an existing address
//! is a no-op reported through the response rather than an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EmailAddress, Error, Role, User, UserId, UserName, UserValidationError};

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    /// Role granted on first registration; defaults to no role.
    #[serde(default)]
    pub role: Role,
}

/// Response from registering a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    /// Whether a new account was created by this call.
    pub created: bool,
    /// The account now stored under the requested email.
    pub user: User,
}

/// Response from a role promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdateResponse {
    /// Number of accounts updated; zero when the id was unknown.
    pub updated: u64,
}

/// Driving port for user write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user, or report the existing account when the email is
    /// already taken.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use instruplay_backend::domain::Role;
    /// # use instruplay_backend::domain::ports::{
    /// #     FixtureUsersCommand, RegisterUserRequest, UsersCommand,
    /// # };
    /// # async fn example() -> Result<(), instruplay_backend::domain::Error> {
    /// let command = FixtureUsersCommand;
    /// let response = command
    ///     .register(RegisterUserRequest {
    ///         name: "Ada Lovelace".to_owned(),
    ///         email: "ada@example.com".to_owned(),
    ///         role: Role::None,
    ///     })
    ///     .await?;
    /// assert!(response.created);
    /// # Ok(())
    /// # }
    /// ```
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error>;

    /// Set the role on the account with the given id.
    async fn promote(&self, user_id: Uuid, role: Role) -> Result<RoleUpdateResponse, Error>;
}

/// Map a validation failure on boundary input to a request error.
pub(crate) fn invalid_user_payload(err: UserValidationError) -> Error {
    Error::invalid_request(format!("invalid user payload: {err}"))
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersCommand;

#[async_trait]
impl UsersCommand for FixtureUsersCommand {
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error> {
        let name = UserName::new(request.name).map_err(invalid_user_payload)?;
        let email = EmailAddress::new(request.email).map_err(invalid_user_payload)?;
        Ok(RegisterUserResponse {
            created: true,
            user: User::new(UserId::random(), name, email, request.role),
        })
    }

    async fn promote(&self, _user_id: Uuid, _role: Role) -> Result<RoleUpdateResponse, Error> {
        Ok(RoleUpdateResponse { updated: 1 })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn register_request() -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            role: Role::None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_register_reports_created(register_request: RegisterUserRequest) {
        let command = FixtureUsersCommand;
        let response = command
            .register(register_request)
            .await
            .expect("fixture registration succeeds");
        assert!(response.created);
        assert_eq!(response.user.email().as_ref(), "ada@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_register_rejects_invalid_email(register_request: RegisterUserRequest) {
        let command = FixtureUsersCommand;
        let request = RegisterUserRequest {
            email: "not-an-email".to_owned(),
            ..register_request
        };
        let err = command
            .register(request)
            .await
            .expect_err("invalid email is rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn register_request_defaults_role_to_none() {
        let request: RegisterUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
        }))
        .expect("payload without role deserializes");
        assert_eq!(request.role, Role::None);
    }
}
