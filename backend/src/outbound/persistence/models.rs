//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{cart_entries, classes, payments, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the classes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = classes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClassRow {
    pub id: Uuid,
    pub name: String,
    pub instructor_email: String,
    pub instructor_name: String,
    pub image_url: Option<String>,
    pub available_seats: i32,
    pub students: i32,
    pub price_cents: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new class records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = classes)]
pub(crate) struct NewClassRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub instructor_email: &'a str,
    pub instructor_name: &'a str,
    pub image_url: Option<&'a str>,
    pub available_seats: i32,
    pub students: i32,
    pub price_cents: i64,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the cart_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CartEntryRow {
    pub id: Uuid,
    pub email: String,
    pub class_id: Uuid,
    pub added_at: DateTime<Utc>,
}

/// Insertable struct for creating new cart entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cart_entries)]
pub(crate) struct NewCartEntryRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub class_id: Uuid,
    pub added_at: DateTime<Utc>,
}

/// Row struct for reading from the payments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub email: String,
    pub class_id: Uuid,
    pub cart_entry_id: Uuid,
    pub amount_cents: i64,
    pub paid_at: DateTime<Utc>,
}

/// Insertable struct for recording settled payments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub(crate) struct NewPaymentRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub class_id: Uuid,
    pub cart_entry_id: Uuid,
    pub amount_cents: i64,
    pub paid_at: DateTime<Utc>,
}
