//! Payment records and settlement results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::EmailAddress;

/// A settled payment for a seat on a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Unique payment identifier.
    pub id: Uuid,
    /// Email of the paying student.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
    /// Class the seat was bought on.
    pub class_id: Uuid,
    /// Cart entry the payment settled; retained for audit after deletion.
    pub cart_entry_id: Uuid,
    /// Amount paid in minor currency units.
    pub amount_cents: i64,
    /// When the payment was taken.
    #[schema(value_type = String, format = "date-time")]
    pub paid_at: DateTime<Utc>,
}

/// Input payload for settling a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Email of the paying student.
    pub email: EmailAddress,
    /// Class the seat is being bought on.
    pub class_id: Uuid,
    /// Cart entry being settled.
    pub cart_entry_id: Uuid,
    /// Amount paid in minor currency units.
    pub amount_cents: i64,
    /// Payment timestamp; defaults to the coordinator clock when absent.
    pub paid_at: Option<DateTime<Utc>>,
}

/// Per-step outcome of a settlement.
///
/// Settlement runs three storage writes in sequence without a surrounding
/// transaction, so each count is reported individually. `seats_updated` is
/// zero when the class had no seats left; the payment record still exists in
/// that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReceipt {
    /// Identifier of the inserted payment record.
    pub payment_id: Uuid,
    /// Rows touched by the guarded seat decrement (zero or one).
    pub seats_updated: u64,
    /// Cart entries removed (zero or one).
    pub cart_removed: u64,
}
