//! Driving port for class catalogue queries.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Class, ClassStatus, EmailAddress, Error};

/// Domain use-case port for reading the class catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassesQuery: Send + Sync {
    /// Approved classes ordered by enrolled students, most popular first.
    async fn list_public(&self) -> Result<Vec<Class>, Error>;

    /// Every class regardless of moderation state.
    async fn list_all(&self) -> Result<Vec<Class>, Error>;

    /// Classes owned by the given instructor.
    async fn list_for_instructor(&self, email: &EmailAddress) -> Result<Vec<Class>, Error>;
}

/// Temporary fixture catalogue used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClassesQuery;

impl FixtureClassesQuery {
    fn fixture_class() -> Result<Class, Error> {
        let instructor_email = EmailAddress::new("marta@example.com")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(Class {
            id: Uuid::nil(),
            name: "Violin for Beginners".to_owned(),
            instructor_email,
            instructor_name: "Marta Kowalska".to_owned(),
            image_url: None,
            available_seats: 5,
            students: 12,
            price_cents: 69_900,
            status: ClassStatus::Approved,
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ClassesQuery for FixtureClassesQuery {
    async fn list_public(&self) -> Result<Vec<Class>, Error> {
        Ok(vec![Self::fixture_class()?])
    }

    async fn list_all(&self) -> Result<Vec<Class>, Error> {
        Ok(vec![Self::fixture_class()?])
    }

    async fn list_for_instructor(&self, email: &EmailAddress) -> Result<Vec<Class>, Error> {
        let class = Self::fixture_class()?;
        Ok((&class.instructor_email == email)
            .then_some(class)
            .into_iter()
            .collect())
    }
}
