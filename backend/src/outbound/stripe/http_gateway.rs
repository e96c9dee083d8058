//! Reqwest-backed Stripe payment gateway adapter.
//!
//! This adapter owns transport details only: form serialisation of the
//! intent request, bearer authentication with the secret key, HTTP error
//! mapping, and JSON decoding into the domain intent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{PaymentIntentDto, StripeErrorEnvelopeDto};
use crate::domain::ports::{
    PaymentGateway, PaymentGatewayError, PaymentIntent, PaymentIntentRequest,
};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "instruplay-backend/0.1";
const BODY_PREVIEW_MAX_CHARS: usize = 256;

/// Outbound identity and timeout settings for Stripe requests.
pub struct StripeHttpIdentity {
    /// HTTP user-agent sent to Stripe.
    pub user_agent: String,
    /// Per-request timeout applied by the reqwest client.
    pub request_timeout: Duration,
}

impl Default for StripeHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

/// Stripe gateway adapter creating payment intents over HTTPS.
pub struct StripeHttpGateway {
    client: Client,
    endpoint: Url,
    secret_key: Zeroizing<String>,
}

impl StripeHttpGateway {
    /// Build an adapter against the given payment-intent endpoint.
    ///
    /// The endpoint is injectable so tests can point the adapter at a local
    /// stub; production wiring passes Stripe's live URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, secret_key: String) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, secret_key, StripeHttpIdentity::default())
    }

    /// Build an adapter with explicit outbound identity and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        secret_key: String,
        identity: StripeHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(identity.request_timeout)
            .user_agent(identity.user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            secret_key: Zeroizing::new(secret_key),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeHttpGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        if request.amount_cents <= 0 {
            return Err(PaymentGatewayError::invalid_request(
                "amount must be positive",
            ));
        }

        let form = [
            ("amount", request.amount_cents.to_string()),
            ("currency", request.currency.clone()),
            ("receipt_email", request.payer_email.as_ref().to_owned()),
            ("automatic_payment_methods[enabled]", "true".to_owned()),
        ];

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.secret_key.as_str())
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_intent(body.as_ref())
    }
}

fn parse_intent(body: &[u8]) -> Result<PaymentIntent, PaymentGatewayError> {
    let decoded: PaymentIntentDto = serde_json::from_slice(body).map_err(|error| {
        PaymentGatewayError::decode(format!("invalid Stripe JSON payload: {error}"))
    })?;
    decoded.into_domain_intent().map_err(PaymentGatewayError::decode)
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    if error.is_timeout() {
        PaymentGatewayError::timeout(error.to_string())
    } else {
        PaymentGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    let message = serde_json::from_slice::<StripeErrorEnvelopeDto>(body)
        .ok()
        .and_then(StripeErrorEnvelopeDto::into_message)
        .unwrap_or_else(|| body_preview(body));
    let message = if message.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), message)
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        PaymentGatewayError::rate_limited(message)
    } else if status.is_client_error() {
        PaymentGatewayError::invalid_request(message)
    } else {
        PaymentGatewayError::transport(message)
    }
}

/// First chunk of the body for diagnostics, never the whole payload.
fn body_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_MAX_CHARS)
        .collect::<String>()
        .trim()
        .to_owned()
}
