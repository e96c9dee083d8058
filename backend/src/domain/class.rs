//! Music class catalogue entities.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::EmailAddress;

/// Moderation state of a class listing.
///
/// New listings start [`ClassStatus::Pending`] and only appear in the public
/// catalogue once an administrator approves them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    /// Awaiting administrator review.
    #[default]
    Pending,
    /// Visible in the public catalogue and open for enrolment.
    Approved,
}

impl ClassStatus {
    /// Stable lowercase label used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClassStatus {
    type Err = UnknownClassStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            other => Err(UnknownClassStatus(other.to_owned())),
        }
    }
}

/// Error returned when a stored status label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClassStatus(String);

impl fmt::Display for UnknownClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown class status: {}", self.0)
    }
}

impl std::error::Error for UnknownClassStatus {}

/// A music class offered on the marketplace.
///
/// ## Invariants
/// - `available_seats` never goes below zero; enrolment uses a guarded
///   storage-level decrement rather than read-modify-write.
/// - `students` counts settled enrolments and only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Unique class identifier.
    pub id: Uuid,
    /// Title shown in the catalogue.
    pub name: String,
    /// Email of the instructor who created the listing.
    #[schema(value_type = String, example = "marta@example.com")]
    pub instructor_email: EmailAddress,
    /// Instructor name captured at creation time.
    pub instructor_name: String,
    /// Cover image for catalogue cards.
    pub image_url: Option<String>,
    /// Seats still open for enrolment.
    pub available_seats: i32,
    /// Number of settled enrolments.
    pub students: i32,
    /// Price per seat in minor currency units.
    pub price_cents: i64,
    /// Moderation state of the listing.
    pub status: ClassStatus,
    /// Creation timestamp.
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating a class listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    /// Title shown in the catalogue.
    pub name: String,
    /// Email of the instructor creating the listing.
    pub instructor_email: EmailAddress,
    /// Instructor name captured at creation time.
    pub instructor_name: String,
    /// Cover image for catalogue cards.
    pub image_url: Option<String>,
    /// Seats open for enrolment at launch.
    pub available_seats: i32,
    /// Price per seat in minor currency units.
    pub price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("pending", ClassStatus::Pending)]
    #[case("approved", ClassStatus::Approved)]
    fn status_parses_stable_labels(#[case] raw: &str, #[case] expected: ClassStatus) {
        let status: ClassStatus = raw.parse().expect("known status");
        assert_eq!(status, expected);
        assert_eq!(status.as_str(), raw);
    }

    #[rstest]
    fn status_rejects_unknown_labels() {
        let result: Result<ClassStatus, _> = "archived".parse();
        assert!(result.is_err());
    }

    #[rstest]
    fn class_serialises_camel_case() {
        let class = Class {
            id: Uuid::nil(),
            name: "Violin for Beginners".to_owned(),
            instructor_email: EmailAddress::new("marta@example.com").expect("valid email"),
            instructor_name: "Marta Kowalska".to_owned(),
            image_url: None,
            available_seats: 5,
            students: 12,
            price_cents: 69_900,
            status: ClassStatus::Approved,
            created_at: DateTime::<Utc>::MIN_UTC,
        };

        let value = serde_json::to_value(class).expect("class serialises");
        assert_eq!(value["availableSeats"], json!(5));
        assert_eq!(value["priceCents"], json!(69_900));
        assert_eq!(value["status"], json!("approved"));
    }
}
