//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. When a
//! migration changes the schema, regenerate with `diesel print-schema` or
//! update by hand.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique index; registration relies on it for the
    /// insert-if-absent semantics.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name shown to other users.
        name -> Varchar,
        /// Unique account email, stored lowercase.
        email -> Varchar,
        /// Access level label: `none`, `instructor`, or `admin`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Music class listings.
    classes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Title shown in the catalogue.
        name -> Varchar,
        /// Email of the instructor who created the listing.
        instructor_email -> Varchar,
        /// Instructor name captured at creation time.
        instructor_name -> Varchar,
        /// Optional cover image for catalogue cards.
        image_url -> Nullable<Text>,
        /// Seats still open; kept non-negative by the guarded enrolment
        /// update and a CHECK constraint.
        available_seats -> Int4,
        /// Number of settled enrolments.
        students -> Int4,
        /// Price per seat in minor currency units.
        price_cents -> Int8,
        /// Moderation state label: `pending` or `approved`.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Classes saved to student carts ahead of checkout.
    cart_entries (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Email of the owning student.
        email -> Varchar,
        /// Class the student intends to buy a seat on.
        class_id -> Uuid,
        /// When the entry was added.
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Settled payments; append-only.
    payments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Email of the paying student.
        email -> Varchar,
        /// Class the seat was bought on.
        class_id -> Uuid,
        /// Cart entry the payment settled; retained for audit after the
        /// entry itself is deleted.
        cart_entry_id -> Uuid,
        /// Amount paid in minor currency units.
        amount_cents -> Int8,
        /// When the payment was taken.
        paid_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, classes, cart_entries, payments);
