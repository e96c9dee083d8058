//! Port for user account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailAddress, Role, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Port for reading and mutating user accounts.
///
/// Email is the natural key; the UUID id exists for promotion endpoints and
/// foreign references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless the email is already registered.
    ///
    /// Returns `true` when a row was inserted, `false` when the email
    /// already existed. Never overwrites an existing account.
    async fn create_if_absent(&self, user: &User) -> Result<bool, UserRepositoryError>;

    /// Find a user by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// List every registered user.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// List users holding the given role.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserRepositoryError>;

    /// Set the role on the user with the given id.
    ///
    /// Returns the number of rows updated (zero when the id is unknown).
    async fn set_role(&self, user_id: &Uuid, role: Role) -> Result<u64, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create_if_absent(&self, _user: &User) -> Result<bool, UserRepositoryError> {
        Ok(true)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_role(&self, _role: Role) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }

    async fn set_role(&self, _user_id: &Uuid, _role: Role) -> Result<u64, UserRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureUserRepository;
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let found = repo
            .find_by_email(&email)
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_set_role_touches_nothing() {
        let repo = FixtureUserRepository;
        let updated = repo
            .set_role(&Uuid::new_v4(), Role::Admin)
            .await
            .expect("fixture update succeeds");
        assert_eq!(updated, 0);
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = UserRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
