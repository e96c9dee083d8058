//! Driving port for checkout: payment intents and settlement.
//!
//! Settlement applies three dependent writes in sequence with no
//! surrounding transaction; the receipt reports each step's outcome so
//! callers can observe partial completion.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::PaymentIntent;
use crate::domain::{EmailAddress, Error, PaymentDraft, SettlementReceipt};

/// Driving port for checkout write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutCommand: Send + Sync {
    /// Create a payment intent for the given amount on behalf of the payer.
    async fn create_intent(
        &self,
        payer: &EmailAddress,
        amount_cents: i64,
    ) -> Result<PaymentIntent, Error>;

    /// Settle a completed payment: record it, take one seat on the class,
    /// and clear the cart entry.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use uuid::Uuid;
    /// # use instruplay_backend::domain::{EmailAddress, PaymentDraft};
    /// # use instruplay_backend::domain::ports::{CheckoutCommand, FixtureCheckoutCommand};
    /// # async fn example() -> Result<(), instruplay_backend::domain::Error> {
    /// let command = FixtureCheckoutCommand;
    /// let receipt = command
    ///     .settle(PaymentDraft {
    ///         email: EmailAddress::new("ada@example.com")
    ///             .map_err(|err| instruplay_backend::domain::Error::invalid_request(err.to_string()))?,
    ///         class_id: Uuid::new_v4(),
    ///         cart_entry_id: Uuid::new_v4(),
    ///         amount_cents: 4_500,
    ///         paid_at: None,
    ///     })
    ///     .await?;
    /// assert_eq!(receipt.seats_updated, 1);
    /// # Ok(())
    /// # }
    /// ```
    async fn settle(&self, draft: PaymentDraft) -> Result<SettlementReceipt, Error>;
}

/// Fixture checkout implementation reporting a fully successful settlement.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckoutCommand;

#[async_trait]
impl CheckoutCommand for FixtureCheckoutCommand {
    async fn create_intent(
        &self,
        _payer: &EmailAddress,
        amount_cents: i64,
    ) -> Result<PaymentIntent, Error> {
        Ok(PaymentIntent {
            intent_id: "pi_fixture".to_owned(),
            client_secret: format!("pi_fixture_secret_{amount_cents}"),
        })
    }

    async fn settle(&self, _draft: PaymentDraft) -> Result<SettlementReceipt, Error> {
        Ok(SettlementReceipt {
            payment_id: Uuid::new_v4(),
            seats_updated: 1,
            cart_removed: 1,
        })
    }
}
