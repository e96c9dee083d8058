//! Driven port for creating payment intents with the card processor.
//!
//! The domain owns the request shape and response contract so checkout
//! orchestration can stay adapter-agnostic.

use async_trait::async_trait;

use crate::domain::EmailAddress;

use super::define_port_error;

/// Domain-owned intent request passed to the gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    /// Amount to charge in the currency's minor unit (pence, cents).
    pub amount_cents: i64,
    /// ISO 4217 currency code, lowercase.
    pub currency: String,
    /// Payer email forwarded to the processor for receipts.
    pub payer_email: EmailAddress,
}

/// Intent created by the processor; the secret is handed to the browser to
/// confirm the charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Processor-side intent identifier.
    pub intent_id: String,
    /// Client secret the frontend uses to confirm the payment.
    pub client_secret: String,
}

define_port_error! {
    /// Errors surfaced while calling the payment processor.
    pub enum PaymentGatewayError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "payment gateway transport failed: {message}",
        /// Processor call exceeded timeout.
        Timeout { message: String } =>
            "payment gateway timeout: {message}",
        /// Processor rate-limited the request.
        RateLimited { message: String } =>
            "payment gateway rate limited request: {message}",
        /// Processor response could not be decoded.
        Decode { message: String } =>
            "payment gateway response decode failed: {message}",
        /// Adapter rejected request before execution.
        InvalidRequest { message: String } =>
            "payment gateway request invalid: {message}",
    }
}

impl PaymentGatewayError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for creating payment intents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create one payment intent for the given amount.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use instruplay_backend::domain::EmailAddress;
    /// use instruplay_backend::domain::ports::{
    ///     FixturePaymentGateway, PaymentGateway, PaymentIntentRequest,
    /// };
    ///
    /// let gateway = FixturePaymentGateway;
    /// let intent = gateway
    ///     .create_intent(&PaymentIntentRequest {
    ///         amount_cents: 4_500,
    ///         currency: "usd".to_owned(),
    ///         payer_email: EmailAddress::new("ada@example.com")?,
    ///     })
    ///     .await?;
    /// assert!(intent.client_secret.starts_with("pi_fixture"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError>;
}

/// Fixture implementation returning a deterministic intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePaymentGateway;

#[async_trait]
impl PaymentGateway for FixturePaymentGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        Ok(PaymentIntent {
            intent_id: "pi_fixture".to_owned(),
            client_secret: format!("pi_fixture_secret_{}", request.amount_cents),
        })
    }
}
