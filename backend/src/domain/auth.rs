//! Credential verification primitives.
//!
//! [`TokenAuthority`] signs and verifies the bearer tokens carried on the
//! `Authorization` header. Verification is deliberately clock-injected so the
//! seven-day expiry window is testable without waiting.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{EmailAddress, Error};
use crate::domain::ports::{IssuedToken, TokenService};

/// Token lifetime in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Message returned for every credential failure.
///
/// Clients receive the same message whether the token is missing, malformed,
/// forged, or expired.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";

/// Verified identity extracted from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    email: EmailAddress,
    expires_at: DateTime<Utc>,
}

impl Claim {
    /// Build a claim from verified components.
    pub fn new(email: EmailAddress, expires_at: DateTime<Utc>) -> Self {
        Self { email, expires_at }
    }

    /// Email the token was issued for.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Instant after which the token stops being accepted.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Wire layout of the signed token payload.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256-signed bearer tokens.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    /// Build an authority from the shared signing secret.
    ///
    /// The secret bytes are wiped once the signing keys are derived.
    pub fn new(secret: Vec<u8>, clock: Arc<dyn Clock>) -> Self {
        let secret = Zeroizing::new(secret);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            clock,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, Error> {
        // Expiry is checked against the injected clock below, not the host
        // clock jsonwebtoken would consult.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

impl TokenService for TokenAuthority {
    fn issue(&self, email: &EmailAddress) -> Result<IssuedToken, Error> {
        let now = self.clock.utc();
        let expires_at = now + Duration::days(TOKEN_TTL_DAYS);
        let claims = TokenClaims {
            sub: email.as_ref().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("token signing failed: {err}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<Claim, Error> {
        let claims = self.decode_claims(token)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))?;
        if expires_at <= self.clock.utc() {
            return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
        }

        let email =
            EmailAddress::new(claims.sub).map_err(|_| Error::unauthorized(UNAUTHORIZED_MESSAGE))?;
        Ok(Claim::new(email, expires_at))
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
