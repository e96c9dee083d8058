//! Token round-trip coverage for [`TokenAuthority`].

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;

const SECRET: &[u8] = b"integration-test-secret-of-sufficient-length";

fn clock_at(now: DateTime<Utc>) -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn authority_at(now: DateTime<Utc>) -> TokenAuthority {
    TokenAuthority::new(SECRET.to_vec(), clock_at(now))
}

#[fixture]
fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid instant")
}

#[fixture]
fn email() -> EmailAddress {
    EmailAddress::new("ada@example.com").expect("valid email")
}

#[rstest]
fn issued_token_expires_after_seven_days(issued_at: DateTime<Utc>, email: EmailAddress) {
    let issued = authority_at(issued_at)
        .issue(&email)
        .expect("token issues");
    assert_eq!(issued.expires_at, issued_at + Duration::days(TOKEN_TTL_DAYS));
    assert!(!issued.token.is_empty());
}

#[rstest]
fn verify_accepts_token_inside_window(issued_at: DateTime<Utc>, email: EmailAddress) {
    let issued = authority_at(issued_at)
        .issue(&email)
        .expect("token issues");

    let verifier = authority_at(issued_at + Duration::days(6));
    let claim = verifier.verify(&issued.token).expect("token verifies");
    assert_eq!(claim.email(), &email);
    assert_eq!(claim.expires_at(), issued.expires_at);
}

#[rstest]
fn verify_rejects_token_after_expiry(issued_at: DateTime<Utc>, email: EmailAddress) {
    let issued = authority_at(issued_at)
        .issue(&email)
        .expect("token issues");

    let verifier = authority_at(issued_at + Duration::days(TOKEN_TTL_DAYS) + Duration::seconds(1));
    let error = issued_error(&verifier, &issued.token);
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), UNAUTHORIZED_MESSAGE);
}

#[rstest]
fn verify_rejects_token_at_exact_expiry(issued_at: DateTime<Utc>, email: EmailAddress) {
    let issued = authority_at(issued_at)
        .issue(&email)
        .expect("token issues");

    let verifier = authority_at(issued.expires_at);
    let error = issued_error(&verifier, &issued.token);
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
fn verify_rejects_garbage_token(issued_at: DateTime<Utc>) {
    let error = issued_error(&authority_at(issued_at), "not-a-token");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), UNAUTHORIZED_MESSAGE);
}

#[rstest]
fn verify_rejects_token_signed_with_other_secret(issued_at: DateTime<Utc>, email: EmailAddress) {
    let foreign = TokenAuthority::new(b"a-completely-different-secret-value".to_vec(),
        clock_at(issued_at));
    let issued = foreign.issue(&email).expect("token issues");

    let error = issued_error(&authority_at(issued_at), &issued.token);
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

fn issued_error(authority: &TokenAuthority, token: &str) -> Error {
    authority
        .verify(token)
        .expect_err("verification should fail")
}
