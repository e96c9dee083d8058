//! Port for payment record persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PaymentRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment repository adapters.
    pub enum PaymentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "payment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "payment repository query failed: {message}",
    }
}

/// Port for recording settled payments and reading payment history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a payment record.
    async fn insert(&self, payment: &PaymentRecord) -> Result<(), PaymentRepositoryError>;

    /// List payments made by the given email, most recent first.
    async fn list_by_payer(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, PaymentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise payment persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentRepository;

#[async_trait]
impl PaymentRepository for FixturePaymentRepository {
    async fn insert(&self, _payment: &PaymentRecord) -> Result<(), PaymentRepositoryError> {
        Ok(())
    }

    async fn list_by_payer(
        &self,
        _email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, PaymentRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_history_is_empty() {
        let repo = FixturePaymentRepository;
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let history = repo
            .list_by_payer(&email)
            .await
            .expect("fixture history succeeds");
        assert!(history.is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = PaymentRepositoryError::query("syntax error");
        assert!(err.to_string().contains("syntax error"));
    }
}
