//! DTOs for decoding Stripe JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain [`PaymentIntent`](crate::domain::ports::PaymentIntent) in one pass.

use serde::Deserialize;

use crate::domain::ports::PaymentIntent;

/// Success payload of `POST /v1/payment_intents`.
#[derive(Debug, Deserialize)]
pub(super) struct PaymentIntentDto {
    pub(super) id: String,
    pub(super) client_secret: Option<String>,
}

impl PaymentIntentDto {
    pub(super) fn into_domain_intent(self) -> Result<PaymentIntent, String> {
        let client_secret = self
            .client_secret
            .ok_or_else(|| format!("intent {} missing client_secret", self.id))?;
        if client_secret.is_empty() {
            return Err(format!("intent {} has an empty client_secret", self.id));
        }

        Ok(PaymentIntent {
            intent_id: self.id,
            client_secret,
        })
    }
}

/// Error envelope Stripe wraps every non-2xx body in.
#[derive(Debug, Deserialize)]
pub(super) struct StripeErrorEnvelopeDto {
    pub(super) error: StripeErrorDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct StripeErrorDto {
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(rename = "type", default)]
    pub(super) error_type: Option<String>,
}

impl StripeErrorEnvelopeDto {
    /// Best-effort human message for logs and error payloads.
    pub(super) fn into_message(self) -> Option<String> {
        match (self.error.error_type, self.error.message) {
            (Some(kind), Some(message)) => Some(format!("{kind}: {message}")),
            (None, Some(message)) => Some(message),
            (Some(kind), None) => Some(kind),
            (None, None) => None,
        }
    }
}
