//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns. Production backs this
//! port with a repository; tests can use a deterministic fixture.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Role, User, UserId, UserName};

/// Domain use-case port for reading user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return every user holding the given role, for the public instructor
    /// directory.
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, Error>;

    /// Fetch one user by email.
    async fn find_user(&self, email: &EmailAddress) -> Result<Option<User>, Error>;

    /// Report the stored role for the given email.
    ///
    /// Unknown emails report [`Role::None`] rather than an error so role
    /// checks stay total.
    async fn role_of(&self, email: &EmailAddress) -> Result<Role, Error>;
}

/// Temporary fixture users query used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

impl FixtureUsersQuery {
    fn fixture_user() -> Result<User, Error> {
        const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        const FIXTURE_NAME: &str = "Ada Lovelace";
        const FIXTURE_EMAIL: &str = "ada@example.com";

        // These values are compile-time constants; surface invalid data as an
        // internal error so automated checks catch accidental regressions.
        let id = UserId::new(FIXTURE_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let name = UserName::new(FIXTURE_NAME)
            .map_err(|err| Error::internal(format!("invalid fixture user name: {err}")))?;
        let email = EmailAddress::new(FIXTURE_EMAIL)
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(User::new(id, name, email, Role::Admin))
    }
}

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(vec![Self::fixture_user()?])
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, Error> {
        let user = Self::fixture_user()?;
        Ok((user.role() == role).then_some(user).into_iter().collect())
    }

    async fn find_user(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        let user = Self::fixture_user()?;
        Ok((user.email() == email).then_some(user))
    }

    async fn role_of(&self, email: &EmailAddress) -> Result<Role, Error> {
        Ok(self
            .find_user(email)
            .await?
            .map_or(Role::None, |user| user.role()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_users_query_returns_expected_user() {
        let query = FixtureUsersQuery;

        let users = query.list_users().await.expect("users list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name().as_ref(), "Ada Lovelace");
        assert_eq!(users[0].role(), Role::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_role_lookup_defaults_to_none_for_strangers() {
        let query = FixtureUsersQuery;
        let stranger = EmailAddress::new("nobody@example.com").expect("valid email");

        let role = query.role_of(&stranger).await.expect("role lookup");
        assert_eq!(role, Role::None);
    }
}
