//! Port for shopping cart persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CartEntry, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cart repository adapters.
    pub enum CartRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "cart repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cart repository query failed: {message}",
    }
}

/// Port for reading and mutating cart entries.
///
/// Every operation is scoped to an owner email so one student can never
/// read or delete another student's cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert a cart entry.
    async fn insert(&self, entry: &CartEntry) -> Result<(), CartRepositoryError>;

    /// List the cart entries owned by the given email.
    async fn list_by_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<CartEntry>, CartRepositoryError>;

    /// Delete the entry with the given id, but only when the owner matches.
    ///
    /// Returns the number of rows removed (zero when the id is unknown or
    /// belongs to another owner).
    async fn remove_for_owner(
        &self,
        entry_id: &Uuid,
        email: &EmailAddress,
    ) -> Result<u64, CartRepositoryError>;
}

/// Fixture implementation for tests that do not exercise cart persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartRepository;

#[async_trait]
impl CartRepository for FixtureCartRepository {
    async fn insert(&self, _entry: &CartEntry) -> Result<(), CartRepositoryError> {
        Ok(())
    }

    async fn list_by_owner(
        &self,
        _email: &EmailAddress,
    ) -> Result<Vec<CartEntry>, CartRepositoryError> {
        Ok(Vec::new())
    }

    async fn remove_for_owner(
        &self,
        _entry_id: &Uuid,
        _email: &EmailAddress,
    ) -> Result<u64, CartRepositoryError> {
        Ok(1)
    }
}
