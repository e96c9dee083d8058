//! Checkout settlement coordination.
//!
//! Settling a payment applies three dependent writes in order: record the
//! payment, take one seat on the class, and clear the cart entry. There is no
//! transaction spanning the three collections; a failure partway leaves the
//! earlier writes in place, and the receipt reports each step's outcome so
//! callers can observe partial completion. The seat update happens as one
//! guarded statement inside the class repository, never as a read-modify-write
//! in this coordinator, so concurrent settlements cannot oversell a class.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CartRepository, CartRepositoryError, CheckoutCommand, ClassRepository, ClassRepositoryError,
    PaymentGateway, PaymentGatewayError, PaymentIntent, PaymentIntentRequest, PaymentRepository,
    PaymentRepositoryError, PaymentsQuery,
};
use crate::domain::{EmailAddress, Error, PaymentDraft, PaymentRecord, SettlementReceipt};

/// Currency every intent is created in; the marketplace prices all classes
/// in one currency.
const SETTLEMENT_CURRENCY: &str = "usd";

fn map_payment_repository_error(error: PaymentRepositoryError) -> Error {
    match error {
        PaymentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("payment repository unavailable: {message}"))
        }
        PaymentRepositoryError::Query { message } => {
            Error::internal(format!("payment repository error: {message}"))
        }
    }
}

fn map_class_repository_error(error: ClassRepositoryError) -> Error {
    match error {
        ClassRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("class repository unavailable: {message}"))
        }
        ClassRepositoryError::Query { message } => {
            Error::internal(format!("class repository error: {message}"))
        }
    }
}

fn map_cart_repository_error(error: CartRepositoryError) -> Error {
    match error {
        CartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cart repository unavailable: {message}"))
        }
        CartRepositoryError::Query { message } => {
            Error::internal(format!("cart repository error: {message}"))
        }
    }
}

fn map_gateway_error(error: PaymentGatewayError) -> Error {
    match error {
        PaymentGatewayError::InvalidRequest { message } => {
            Error::invalid_request(format!("payment intent rejected: {message}"))
        }
        PaymentGatewayError::Transport { message }
        | PaymentGatewayError::Timeout { message }
        | PaymentGatewayError::RateLimited { message } => {
            Error::service_unavailable(format!("payment processor unavailable: {message}"))
        }
        PaymentGatewayError::Decode { message } => {
            Error::internal(format!("payment processor response invalid: {message}"))
        }
    }
}

/// Coordinator implementing the checkout driving ports.
#[derive(Clone)]
pub struct SettlementCoordinator<P, C, K, G> {
    payment_repo: Arc<P>,
    class_repo: Arc<C>,
    cart_repo: Arc<K>,
    gateway: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P, C, K, G> SettlementCoordinator<P, C, K, G> {
    /// Create a new coordinator over the three repositories, the payment
    /// gateway, and a clock for stamping payments.
    pub fn new(
        payment_repo: Arc<P>,
        class_repo: Arc<C>,
        cart_repo: Arc<K>,
        gateway: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payment_repo,
            class_repo,
            cart_repo,
            gateway,
            clock,
        }
    }
}

#[async_trait]
impl<P, C, K, G> CheckoutCommand for SettlementCoordinator<P, C, K, G>
where
    P: PaymentRepository,
    C: ClassRepository,
    K: CartRepository,
    G: PaymentGateway,
{
    async fn create_intent(
        &self,
        payer: &EmailAddress,
        amount_cents: i64,
    ) -> Result<PaymentIntent, Error> {
        if amount_cents <= 0 {
            return Err(Error::invalid_request("amount must be positive"));
        }

        self.gateway
            .create_intent(&PaymentIntentRequest {
                amount_cents,
                currency: SETTLEMENT_CURRENCY.to_owned(),
                payer_email: payer.clone(),
            })
            .await
            .map_err(map_gateway_error)
    }

    async fn settle(&self, draft: PaymentDraft) -> Result<SettlementReceipt, Error> {
        if draft.amount_cents <= 0 {
            return Err(Error::invalid_request("amount must be positive"));
        }

        let payment = PaymentRecord {
            id: Uuid::new_v4(),
            email: draft.email,
            class_id: draft.class_id,
            cart_entry_id: draft.cart_entry_id,
            amount_cents: draft.amount_cents,
            paid_at: draft.paid_at.unwrap_or_else(|| self.clock.utc()),
        };

        // Step 1: the payment record is the source of truth for money taken
        // and must land before any counter moves.
        self.payment_repo
            .insert(&payment)
            .await
            .map_err(map_payment_repository_error)?;

        // Step 2: guarded seat decrement. Zero rows means the class vanished
        // or was already full; the payment stays recorded either way.
        let seats_updated = self
            .class_repo
            .enrol_student(&payment.class_id)
            .await
            .map_err(map_class_repository_error)?;

        // Step 3: clear the settled cart entry, scoped to the payer.
        let cart_removed = self
            .cart_repo
            .remove_for_owner(&payment.cart_entry_id, &payment.email)
            .await
            .map_err(map_cart_repository_error)?;

        Ok(SettlementReceipt {
            payment_id: payment.id,
            seats_updated,
            cart_removed,
        })
    }
}

#[async_trait]
impl<P, C, K, G> PaymentsQuery for SettlementCoordinator<P, C, K, G>
where
    P: PaymentRepository,
    C: ClassRepository,
    K: CartRepository,
    G: PaymentGateway,
{
    async fn history_for(&self, payer: &EmailAddress) -> Result<Vec<PaymentRecord>, Error> {
        self.payment_repo
            .list_by_payer(payer)
            .await
            .map_err(map_payment_repository_error)
    }
}

#[cfg(test)]
#[path = "settlement_tests.rs"]
mod tests;
