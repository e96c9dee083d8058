//! Token issue endpoint.
//!
//! ```text
//! POST /api/v1/jwt {"email":"ada@example.com"}
//! ```
//!
//! Issues a signed bearer token for the submitted identity. The endpoint is
//! public: clients call it straight after login or registration, and every
//! protected endpoint then verifies the token it hands back.

use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email};

const EMAIL_FIELD: FieldName = FieldName::new("email");

/// Request body for `POST /api/v1/jwt`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IssueTokenBody {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// A freshly signed token and its expiry instant.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenReply {
    pub token: String,
    #[schema(value_type = String, format = "date-time")]
    pub expires_at: DateTime<Utc>,
}

/// Issue a bearer token for the submitted email.
#[utoipa::path(
    post,
    path = "/api/v1/jwt",
    request_body = IssueTokenBody,
    responses(
        (status = 200, description = "Token issued", body = IssueTokenReply),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["auth"],
    operation_id = "issueToken",
    security([])
)]
#[post("/jwt")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<IssueTokenBody>,
) -> ApiResult<web::Json<IssueTokenReply>> {
    let email = parse_email(payload.into_inner().email, EMAIL_FIELD)?;
    let issued = state.tokens.issue(&email)?;
    Ok(web::Json(IssueTokenReply {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
