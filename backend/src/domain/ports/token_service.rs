//! Driving port for issuing and verifying bearer tokens.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Claim, EmailAddress, Error, TOKEN_TTL_DAYS};

/// A signed bearer token plus the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact token string for the `Authorization: Bearer` header.
    pub token: String,
    /// Expiry instant embedded in the token.
    pub expires_at: DateTime<Utc>,
}

/// Port for the credential lifecycle: issue a token for an identity, and
/// later verify a presented token back into a [`Claim`].
///
/// Verification is pure with respect to storage; role checks happen
/// separately after a claim is established. The trait is synchronous because
/// signing and verification are CPU-only operations.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for the given email, valid for seven days.
    fn issue(&self, email: &EmailAddress) -> Result<IssuedToken, Error>;

    /// Verify a presented token and extract its claim.
    ///
    /// Fails with an unauthorized error when the signature does not match
    /// or the embedded expiry has passed.
    fn verify(&self, token: &str) -> Result<Claim, Error>;
}

/// Fixture implementation for tests that do not exercise real signing.
///
/// Issued tokens echo the email with a `fixture.` prefix and verify back to
/// a claim far in the future. Anything else fails verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, email: &EmailAddress) -> Result<IssuedToken, Error> {
        Ok(IssuedToken {
            token: format!("fixture.{email}"),
            expires_at: Utc::now() + Duration::days(TOKEN_TTL_DAYS),
        })
    }

    fn verify(&self, token: &str) -> Result<Claim, Error> {
        let email = token
            .strip_prefix("fixture.")
            .ok_or_else(|| Error::unauthorized("unauthorized access"))?;
        let email = EmailAddress::new(email)
            .map_err(|_| Error::unauthorized("unauthorized access"))?;
        Ok(Claim::new(email, Utc::now() + Duration::days(TOKEN_TTL_DAYS)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn fixture_round_trips_email() {
        let service = FixtureTokenService;
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let issued = service.issue(&email).expect("fixture issue succeeds");
        let claim = service.verify(&issued.token).expect("fixture verify succeeds");
        assert_eq!(claim.email(), &email);
    }

    #[rstest]
    fn fixture_rejects_unknown_token() {
        let service = FixtureTokenService;
        let err = service
            .verify("not-a-fixture-token")
            .expect_err("unknown token is rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
