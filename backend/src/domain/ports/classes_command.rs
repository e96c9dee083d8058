//! Driving port for class catalogue mutations.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Class, ClassDraft, ClassStatus, Error};

/// Response from a moderation update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassModerationResponse {
    /// Number of listings updated; zero when the id was unknown.
    pub updated: u64,
}

/// Driving port for class write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassesCommand: Send + Sync {
    /// Create a class listing in the pending state.
    ///
    /// Listings stay out of the public catalogue until approved.
    async fn create_class(&self, draft: ClassDraft) -> Result<Class, Error>;

    /// Approve the listing with the given id.
    async fn approve_class(&self, class_id: Uuid) -> Result<ClassModerationResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClassesCommand;

#[async_trait]
impl ClassesCommand for FixtureClassesCommand {
    async fn create_class(&self, draft: ClassDraft) -> Result<Class, Error> {
        Ok(Class {
            id: Uuid::new_v4(),
            name: draft.name,
            instructor_email: draft.instructor_email,
            instructor_name: draft.instructor_name,
            image_url: draft.image_url,
            available_seats: draft.available_seats,
            students: 0,
            price_cents: draft.price_cents,
            status: ClassStatus::Pending,
            created_at: Utc::now(),
        })
    }

    async fn approve_class(&self, _class_id: Uuid) -> Result<ClassModerationResponse, Error> {
        Ok(ClassModerationResponse { updated: 1 })
    }
}
