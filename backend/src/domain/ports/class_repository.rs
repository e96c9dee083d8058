//! Port for class catalogue persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Class, ClassStatus, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by class repository adapters.
    pub enum ClassRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "class repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "class repository query failed: {message}",
    }
}

/// Port for reading and mutating the class catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Insert a new class record.
    async fn insert(&self, class: &Class) -> Result<(), ClassRepositoryError>;

    /// List approved classes ordered by enrolled students, most popular
    /// first.
    async fn list_approved(&self) -> Result<Vec<Class>, ClassRepositoryError>;

    /// List every class regardless of status.
    async fn list_all(&self) -> Result<Vec<Class>, ClassRepositoryError>;

    /// List classes owned by the given instructor.
    async fn list_by_instructor(
        &self,
        instructor_email: &EmailAddress,
    ) -> Result<Vec<Class>, ClassRepositoryError>;

    /// Set the status on the class with the given id.
    ///
    /// Returns the number of rows updated (zero when the id is unknown).
    async fn set_status(
        &self,
        class_id: &Uuid,
        status: ClassStatus,
    ) -> Result<u64, ClassRepositoryError>;

    /// Record one enrolment: decrement the available seats and increment the
    /// student count in a single guarded statement.
    ///
    /// Adapters must express both counters in one conditional update so the
    /// seat count can never go negative under concurrent checkouts. Returns
    /// the number of rows updated; zero means the class was unknown or had no
    /// seats left.
    async fn enrol_student(&self, class_id: &Uuid) -> Result<u64, ClassRepositoryError>;
}

/// Fixture implementation for tests that do not exercise class persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClassRepository;

#[async_trait]
impl ClassRepository for FixtureClassRepository {
    async fn insert(&self, _class: &Class) -> Result<(), ClassRepositoryError> {
        Ok(())
    }

    async fn list_approved(&self) -> Result<Vec<Class>, ClassRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Class>, ClassRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_instructor(
        &self,
        _instructor_email: &EmailAddress,
    ) -> Result<Vec<Class>, ClassRepositoryError> {
        Ok(Vec::new())
    }

    async fn set_status(
        &self,
        _class_id: &Uuid,
        _status: ClassStatus,
    ) -> Result<u64, ClassRepositoryError> {
        Ok(0)
    }

    async fn enrol_student(&self, _class_id: &Uuid) -> Result<u64, ClassRepositoryError> {
        Ok(1)
    }
}
