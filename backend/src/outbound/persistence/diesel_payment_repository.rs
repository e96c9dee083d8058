//! PostgreSQL-backed `PaymentRepository` implementation using Diesel ORM.
//!
//! Payments are append-only: the port offers insert and payer-scoped
//! history, nothing else, and no code path updates or deletes a row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PaymentRepository, PaymentRepositoryError};
use crate::domain::{EmailAddress, PaymentRecord};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPaymentRow, PaymentRow};
use super::pool::{DbPool, PoolError};
use super::schema::payments;

/// Diesel-backed implementation of the `PaymentRepository` port.
#[derive(Clone)]
pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PaymentRepositoryError {
    map_pool_error(error, PaymentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PaymentRepositoryError {
    map_diesel_error(
        error,
        PaymentRepositoryError::query,
        PaymentRepositoryError::connection,
    )
}

/// Convert a database row to a domain [`PaymentRecord`].
fn row_to_payment(row: PaymentRow) -> Result<PaymentRecord, PaymentRepositoryError> {
    let email = EmailAddress::new(row.email).map_err(|err| {
        PaymentRepositoryError::query(format!("stored payer email invalid: {err}"))
    })?;

    Ok(PaymentRecord {
        id: row.id,
        email,
        class_id: row.class_id,
        cart_entry_id: row.cart_entry_id,
        amount_cents: row.amount_cents,
        paid_at: row.paid_at,
    })
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn insert(&self, payment: &PaymentRecord) -> Result<(), PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewPaymentRow {
            id: payment.id,
            email: payment.email.as_ref(),
            class_id: payment.class_id,
            cart_entry_id: payment.cart_entry_id,
            amount_cents: payment.amount_cents,
            paid_at: payment.paid_at,
        };

        diesel::insert_into(payments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(())
    }

    async fn list_by_payer(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<PaymentRow> = payments::table
            .filter(payments::email.eq(email.as_ref()))
            .order(payments::paid_at.desc())
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_payment).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage for the payment adapter.

    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn row_converts_to_domain_payment() {
        let row = PaymentRow {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            class_id: Uuid::new_v4(),
            cart_entry_id: Uuid::new_v4(),
            amount_cents: 69_900,
            paid_at: Utc::now(),
        };
        let payment = row_to_payment(row).expect("valid row converts");
        assert_eq!(payment.amount_cents, 69_900);
    }

    #[rstest]
    fn corrupt_payer_email_is_a_query_error() {
        let row = PaymentRow {
            id: Uuid::new_v4(),
            email: "broken".to_owned(),
            class_id: Uuid::new_v4(),
            cart_entry_id: Uuid::new_v4(),
            amount_cents: 1,
            paid_at: Utc::now(),
        };
        let err = row_to_payment(row).expect_err("corrupt email is rejected");
        assert!(err.to_string().contains("stored payer email invalid"));
    }
}
