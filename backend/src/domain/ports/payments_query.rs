//! Driving port for payment history queries.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, PaymentRecord};

/// Domain use-case port for reading a student's payment history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsQuery: Send + Sync {
    /// List the payments made by the given email, most recent first.
    async fn history_for(&self, payer: &EmailAddress) -> Result<Vec<PaymentRecord>, Error>;
}

/// Temporary fixture history query used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentsQuery;

#[async_trait]
impl PaymentsQuery for FixturePaymentsQuery {
    async fn history_for(&self, _payer: &EmailAddress) -> Result<Vec<PaymentRecord>, Error> {
        Ok(Vec::new())
    }
}
