//! Shopping cart entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::EmailAddress;

/// A class saved to a student's cart ahead of checkout.
///
/// Entries are scoped to the owning email; every cart operation carries the
/// caller's verified email so one student can never read or mutate another's
/// cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Unique cart entry identifier.
    pub id: Uuid,
    /// Email of the student who owns the entry.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
    /// Class the student intends to buy a seat on.
    pub class_id: Uuid,
    /// When the entry was added.
    #[schema(value_type = String, format = "date-time")]
    pub added_at: DateTime<Utc>,
}

/// Input payload for adding a class to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntryDraft {
    /// Email of the student adding the entry.
    pub email: EmailAddress,
    /// Class to reserve a seat on.
    pub class_id: Uuid,
}
