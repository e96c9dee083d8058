//! Stripe outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `PaymentGateway`
//! port against Stripe's payment-intent endpoint.

mod dto;
mod http_gateway;

pub use http_gateway::{StripeHttpGateway, StripeHttpIdentity};
