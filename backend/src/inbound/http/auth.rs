//! Bearer authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential checks and caller identity derivation here. Handlers that need
//! a verified caller take a [`BearerIdentity`] argument; the extractor reads
//! the `Authorization` header and verifies the token through the
//! [`TokenService`](crate::domain::ports::TokenService) port.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use crate::domain::{Claim, Error, UNAUTHORIZED_MESSAGE};

use super::ApiResult;
use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// The verified identity of the calling user.
///
/// Constructed only by the `FromRequest` extractor, so a handler holding one
/// knows the token already passed signature and expiry checks. Role and
/// ownership checks remain the handler's job.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    claim: Claim,
}

impl BearerIdentity {
    /// Borrow the verified claim.
    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// Consume the identity, yielding the claim.
    pub fn into_claim(self) -> Claim {
        self.claim
    }
}

/// Pull the raw token out of the `Authorization` header.
///
/// Absent, non-UTF-8, or non-`Bearer` headers all collapse into the same
/// unauthorized error; the response never says which part was wrong.
fn bearer_token(req: &HttpRequest) -> ApiResult<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
}

fn identity_from_request(req: &HttpRequest) -> ApiResult<BearerIdentity> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("bearer extractor requires HttpState app data"))?;
    let claim = state.tokens.verify(token)?;
    Ok(BearerIdentity { claim })
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<ApiResult<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use crate::domain::ErrorCode;

    use super::*;

    fn request_with_header(value: &str) -> HttpRequest {
        TestRequest::default()
            .insert_header((header::AUTHORIZATION, value))
            .app_data(web::Data::new(HttpState::default()))
            .to_http_request()
    }

    #[actix_web::test]
    async fn extracts_the_claim_from_a_valid_token() {
        let req = request_with_header("Bearer fixture.ada@example.com");
        let identity = BearerIdentity::from_request(&req, &mut Payload::None)
            .await
            .expect("identity");
        assert_eq!(identity.claim().email().as_ref(), "ada@example.com");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        let req = TestRequest::default()
            .app_data(web::Data::new(HttpState::default()))
            .to_http_request();
        let error = BearerIdentity::from_request(&req, &mut Payload::None)
            .await
            .expect_err("should fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), UNAUTHORIZED_MESSAGE);
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_unauthorised() {
        let req = request_with_header("Basic YWRhOnB3");
        let error = BearerIdentity::from_request(&req, &mut Payload::None)
            .await
            .expect_err("should fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let req = request_with_header("Bearer not-a-fixture-token");
        let error = BearerIdentity::from_request(&req, &mut Payload::None)
            .await
            .expect_err("should fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), UNAUTHORIZED_MESSAGE);
    }

    #[actix_web::test]
    async fn missing_state_is_an_internal_error() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer fixture.ada@example.com"))
            .to_http_request();
        let error = BearerIdentity::from_request(&req, &mut Payload::None)
            .await
            .expect_err("should fail");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
