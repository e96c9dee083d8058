//! Shopping cart domain services.
//!
//! Implements the cart command and query driving ports on top of the cart
//! repository. The owner email on every call comes from the verified claim,
//! so ownership checks reduce to scoping each repository call.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CartRemovalResponse, CartRepository, CartRepositoryError, CartsCommand, CartsQuery,
};
use crate::domain::{CartEntry, CartEntryDraft, EmailAddress, Error};

fn map_repository_error(error: CartRepositoryError) -> Error {
    match error {
        CartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cart repository unavailable: {message}"))
        }
        CartRepositoryError::Query { message } => {
            Error::internal(format!("cart repository error: {message}"))
        }
    }
}

/// Cart service implementing the cart driving ports.
#[derive(Clone)]
pub struct CartService<R> {
    cart_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CartService<R> {
    /// Create a new cart service with the cart repository and clock.
    pub fn new(cart_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { cart_repo, clock }
    }
}

#[async_trait]
impl<R> CartsCommand for CartService<R>
where
    R: CartRepository,
{
    async fn add_entry(&self, draft: CartEntryDraft) -> Result<CartEntry, Error> {
        let entry = CartEntry {
            id: Uuid::new_v4(),
            email: draft.email,
            class_id: draft.class_id,
            added_at: self.clock.utc(),
        };

        self.cart_repo
            .insert(&entry)
            .await
            .map_err(map_repository_error)?;

        Ok(entry)
    }

    async fn remove_entry(
        &self,
        entry_id: Uuid,
        owner: &EmailAddress,
    ) -> Result<CartRemovalResponse, Error> {
        let removed = self
            .cart_repo
            .remove_for_owner(&entry_id, owner)
            .await
            .map_err(map_repository_error)?;

        Ok(CartRemovalResponse { removed })
    }
}

#[async_trait]
impl<R> CartsQuery for CartService<R>
where
    R: CartRepository,
{
    async fn list_entries(&self, owner: &EmailAddress) -> Result<Vec<CartEntry>, Error> {
        self.cart_repo
            .list_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
