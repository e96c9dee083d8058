//! Driving port for cart mutations.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CartEntry, CartEntryDraft, EmailAddress, Error};

/// Response from removing a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRemovalResponse {
    /// Entries removed; zero when the id was unknown or owned by someone
    /// else.
    pub removed: u64,
}

/// Driving port for cart write operations.
///
/// The owner email always comes from the verified claim, never from the
/// request body, so callers cannot mutate another student's cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartsCommand: Send + Sync {
    /// Add a class to the owner's cart.
    async fn add_entry(&self, draft: CartEntryDraft) -> Result<CartEntry, Error>;

    /// Remove an entry from the owner's cart.
    async fn remove_entry(
        &self,
        entry_id: Uuid,
        owner: &EmailAddress,
    ) -> Result<CartRemovalResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCartsCommand;

#[async_trait]
impl CartsCommand for FixtureCartsCommand {
    async fn add_entry(&self, draft: CartEntryDraft) -> Result<CartEntry, Error> {
        Ok(CartEntry {
            id: Uuid::new_v4(),
            email: draft.email,
            class_id: draft.class_id,
            added_at: Utc::now(),
        })
    }

    async fn remove_entry(
        &self,
        _entry_id: Uuid,
        _owner: &EmailAddress,
    ) -> Result<CartRemovalResponse, Error> {
        Ok(CartRemovalResponse { removed: 1 })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_add_echoes_draft_fields() {
        let command = FixtureCartsCommand;
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let class_id = Uuid::new_v4();

        let entry = command
            .add_entry(CartEntryDraft {
                email: email.clone(),
                class_id,
            })
            .await
            .expect("fixture add succeeds");

        assert_eq!(entry.email, email);
        assert_eq!(entry.class_id, class_id);
    }
}
