//! PostgreSQL-backed `CartRepository` implementation using Diesel ORM.
//!
//! Deletions always filter on both id and owner email, so the storage layer
//! enforces the same ownership scope the HTTP adapter checks against the
//! caller's claim.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CartRepository, CartRepositoryError};
use crate::domain::{CartEntry, EmailAddress};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CartEntryRow, NewCartEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::cart_entries;

/// Diesel-backed implementation of the `CartRepository` port.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CartRepositoryError {
    map_pool_error(error, CartRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CartRepositoryError {
    map_diesel_error(
        error,
        CartRepositoryError::query,
        CartRepositoryError::connection,
    )
}

/// Convert a database row to a domain [`CartEntry`].
fn row_to_entry(row: CartEntryRow) -> Result<CartEntry, CartRepositoryError> {
    let email = EmailAddress::new(row.email)
        .map_err(|err| CartRepositoryError::query(format!("stored owner email invalid: {err}")))?;

    Ok(CartEntry {
        id: row.id,
        email,
        class_id: row.class_id,
        added_at: row.added_at,
    })
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn insert(&self, entry: &CartEntry) -> Result<(), CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewCartEntryRow {
            id: entry.id,
            email: entry.email.as_ref(),
            class_id: entry.class_id,
            added_at: entry.added_at,
        };

        diesel::insert_into(cart_entries::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(())
    }

    async fn list_by_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<CartEntry>, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CartEntryRow> = cart_entries::table
            .filter(cart_entries::email.eq(email.as_ref()))
            .order(cart_entries::added_at.asc())
            .select(CartEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn remove_for_owner(
        &self,
        entry_id: &Uuid,
        email: &EmailAddress,
    ) -> Result<u64, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let removed = diesel::delete(
            cart_entries::table
                .filter(cart_entries::id.eq(entry_id))
                .filter(cart_entries::email.eq(email.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(removed as u64)
    }
}
