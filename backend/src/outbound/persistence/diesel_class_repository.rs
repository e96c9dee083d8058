//! PostgreSQL-backed `ClassRepository` implementation using Diesel ORM.
//!
//! The enrolment counters are the one place the marketplace needs storage
//! level concurrency control: `enrol_student` moves both counters in a
//! single conditional UPDATE, never a read-modify-write, so concurrent
//! settlements against the same class cannot oversell it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ClassRepository, ClassRepositoryError};
use crate::domain::{Class, ClassStatus, EmailAddress};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ClassRow, NewClassRow};
use super::pool::{DbPool, PoolError};
use super::schema::classes;

/// Diesel-backed implementation of the `ClassRepository` port.
#[derive(Clone)]
pub struct DieselClassRepository {
    pool: DbPool,
}

impl DieselClassRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ClassRepositoryError {
    map_pool_error(error, ClassRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ClassRepositoryError {
    map_diesel_error(
        error,
        ClassRepositoryError::query,
        ClassRepositoryError::connection,
    )
}

/// Convert a database row to a domain [`Class`].
fn row_to_class(row: ClassRow) -> Result<Class, ClassRepositoryError> {
    let status = row.status.parse::<ClassStatus>().unwrap_or_else(|_| {
        warn!(
            value = %row.status,
            class_id = %row.id,
            "unrecognised class status, defaulting to pending"
        );
        ClassStatus::Pending
    });
    let instructor_email = EmailAddress::new(row.instructor_email).map_err(|err| {
        ClassRepositoryError::query(format!("stored instructor email invalid: {err}"))
    })?;

    Ok(Class {
        id: row.id,
        name: row.name,
        instructor_email,
        instructor_name: row.instructor_name,
        image_url: row.image_url,
        available_seats: row.available_seats,
        students: row.students,
        price_cents: row.price_cents,
        status,
        created_at: row.created_at,
    })
}

fn rows_to_classes(rows: Vec<ClassRow>) -> Result<Vec<Class>, ClassRepositoryError> {
    rows.into_iter().map(row_to_class).collect()
}

#[async_trait]
impl ClassRepository for DieselClassRepository {
    async fn insert(&self, class: &Class) -> Result<(), ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewClassRow {
            id: class.id,
            name: &class.name,
            instructor_email: class.instructor_email.as_ref(),
            instructor_name: &class.instructor_name,
            image_url: class.image_url.as_deref(),
            available_seats: class.available_seats,
            students: class.students,
            price_cents: class.price_cents,
            status: class.status.as_str(),
            created_at: class.created_at,
        };

        diesel::insert_into(classes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(())
    }

    async fn list_approved(&self) -> Result<Vec<Class>, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ClassRow> = classes::table
            .filter(classes::status.eq(ClassStatus::Approved.as_str()))
            .order(classes::students.desc())
            .select(ClassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_classes(rows)
    }

    async fn list_all(&self) -> Result<Vec<Class>, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ClassRow> = classes::table
            .order(classes::created_at.desc())
            .select(ClassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_classes(rows)
    }

    async fn list_by_instructor(
        &self,
        instructor_email: &EmailAddress,
    ) -> Result<Vec<Class>, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ClassRow> = classes::table
            .filter(classes::instructor_email.eq(instructor_email.as_ref()))
            .order(classes::created_at.desc())
            .select(ClassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_classes(rows)
    }

    async fn set_status(
        &self,
        class_id: &Uuid,
        status: ClassStatus,
    ) -> Result<u64, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(classes::table.filter(classes::id.eq(class_id)))
            .set(classes::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(updated as u64)
    }

    async fn enrol_student(&self, class_id: &Uuid) -> Result<u64, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // Both counters move in one guarded statement; the seats filter is
        // what keeps available_seats from going negative under concurrent
        // checkouts.
        let updated = diesel::update(
            classes::table
                .filter(classes::id.eq(class_id))
                .filter(classes::available_seats.gt(0)),
        )
        .set((
            classes::available_seats.eq(classes::available_seats - 1),
            classes::students.eq(classes::students + 1),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated as u64)
    }
}
