//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Registration idempotency lives here: `create_if_absent` leans on the
//! unique index over `email` with `ON CONFLICT DO NOTHING`, so the first
//! insert wins and later attempts report zero rows without an error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, Role, User, UserId, UserName};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row to a domain [`User`].
///
/// Stored rows already passed domain validation on the way in; a row that
/// no longer parses indicates out-of-band writes and maps to a query error.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let role = row.role.parse::<Role>().unwrap_or_else(|_| {
        warn!(value = %row.role, user_id = %row.id, "unrecognised role value, defaulting to none");
        Role::None
    });
    let name = UserName::new(row.name)
        .map_err(|err| UserRepositoryError::query(format!("stored user name invalid: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserRepositoryError::query(format!("stored user email invalid: {err}")))?;

    Ok(User::new(UserId::from(row.id), name, email, role))
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserRepositoryError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_if_absent(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            role: user.role().as_str(),
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(inserted > 0)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_users(rows)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::role.eq(role.as_str()))
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_users(rows)
    }

    async fn set_role(&self, user_id: &Uuid, role: Role) -> Result<u64, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(users::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(updated as u64)
    }
}
