//! Driving port for cart queries.

use async_trait::async_trait;

use crate::domain::{CartEntry, EmailAddress, Error};

/// Domain use-case port for reading a student's cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartsQuery: Send + Sync {
    /// List the cart entries owned by the given email.
    ///
    /// The email comes from the verified claim; other students' entries are
    /// never visible through this port.
    async fn list_entries(&self, owner: &EmailAddress) -> Result<Vec<CartEntry>, Error>;
}

/// Temporary fixture cart query used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartsQuery;

#[async_trait]
impl CartsQuery for FixtureCartsQuery {
    async fn list_entries(&self, _owner: &EmailAddress) -> Result<Vec<CartEntry>, Error> {
        Ok(Vec::new())
    }
}
