//! Class catalogue domain services.
//!
//! Implements the class command and query driving ports on top of the class
//! repository. New listings always start pending; approval is a separate
//! admin-gated mutation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    ClassModerationResponse, ClassRepository, ClassRepositoryError, ClassesCommand, ClassesQuery,
};
use crate::domain::{Class, ClassDraft, ClassStatus, EmailAddress, Error};

fn map_repository_error(error: ClassRepositoryError) -> Error {
    match error {
        ClassRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("class repository unavailable: {message}"))
        }
        ClassRepositoryError::Query { message } => {
            Error::internal(format!("class repository error: {message}"))
        }
    }
}

/// Class catalogue service implementing the class driving ports.
#[derive(Clone)]
pub struct ClassCatalogueService<R> {
    class_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ClassCatalogueService<R> {
    /// Create a new catalogue service with the class repository and clock.
    pub fn new(class_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { class_repo, clock }
    }
}

#[async_trait]
impl<R> ClassesCommand for ClassCatalogueService<R>
where
    R: ClassRepository,
{
    async fn create_class(&self, draft: ClassDraft) -> Result<Class, Error> {
        if draft.available_seats < 0 {
            return Err(Error::invalid_request(
                "available seats must not be negative",
            ));
        }
        if draft.price_cents < 0 {
            return Err(Error::invalid_request("price must not be negative"));
        }

        let class = Class {
            id: Uuid::new_v4(),
            name: draft.name,
            instructor_email: draft.instructor_email,
            instructor_name: draft.instructor_name,
            image_url: draft.image_url,
            available_seats: draft.available_seats,
            students: 0,
            price_cents: draft.price_cents,
            status: ClassStatus::Pending,
            created_at: self.clock.utc(),
        };

        self.class_repo
            .insert(&class)
            .await
            .map_err(map_repository_error)?;

        Ok(class)
    }

    async fn approve_class(&self, class_id: Uuid) -> Result<ClassModerationResponse, Error> {
        let updated = self
            .class_repo
            .set_status(&class_id, ClassStatus::Approved)
            .await
            .map_err(map_repository_error)?;

        Ok(ClassModerationResponse { updated })
    }
}

#[async_trait]
impl<R> ClassesQuery for ClassCatalogueService<R>
where
    R: ClassRepository,
{
    async fn list_public(&self) -> Result<Vec<Class>, Error> {
        self.class_repo
            .list_approved()
            .await
            .map_err(map_repository_error)
    }

    async fn list_all(&self) -> Result<Vec<Class>, Error> {
        self.class_repo
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn list_for_instructor(&self, email: &EmailAddress) -> Result<Vec<Class>, Error> {
        self.class_repo
            .list_by_instructor(email)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
