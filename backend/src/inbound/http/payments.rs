//! Checkout and payment-history API handlers.
//!
//! ```text
//! POST /api/v1/create-payment-intent {"amountCents":69900}
//! POST /api/v1/payments {"email":"…","classId":"…","cartEntryId":"…","amountCents":69900}
//! GET /api/v1/payments?email=
//! ```
//!
//! Intent creation charges the verified claim's account, never an email from
//! the request. Settlement runs the three-step sequence (record the payment,
//! take a seat, clear the cart entry) and answers a receipt whose row counts
//! expose how far the sequence got.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, PaymentDraft, PaymentRecord, SettlementReceipt, require_self};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_email, parse_optional_rfc3339_timestamp, parse_uuid,
};

const EMAIL_FIELD: FieldName = FieldName::new("email");
const CLASS_ID_FIELD: FieldName = FieldName::new("classId");
const CART_ENTRY_ID_FIELD: FieldName = FieldName::new("cartEntryId");
const PAID_AT_FIELD: FieldName = FieldName::new("paidAt");

/// Request body for `POST /api/v1/create-payment-intent`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentBody {
    pub amount_cents: i64,
}

/// Client-side handle for completing a card payment.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentReply {
    pub client_secret: String,
}

/// Request body for `POST /api/v1/payments`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentBody {
    pub email: String,
    pub class_id: String,
    pub cart_entry_id: String,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

/// Query parameters for `GET /api/v1/payments`.
#[derive(Debug, Deserialize)]
pub struct PaymentHistoryQuery {
    email: Option<String>,
}

/// Open a payment intent with the processor for the caller's purchase.
#[utoipa::path(
    post,
    path = "/api/v1/create-payment-intent",
    request_body = CreateIntentBody,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "createPaymentIntent",
    security(("BearerToken" = []))
)]
#[post("/create-payment-intent")]
pub async fn create_payment_intent(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<CreateIntentBody>,
) -> ApiResult<web::Json<PaymentIntentReply>> {
    let intent = state
        .checkout
        .create_intent(identity.claim().email(), payload.amount_cents)
        .await?;
    Ok(web::Json(PaymentIntentReply {
        client_secret: intent.client_secret,
    }))
}

/// Settle a completed payment.
///
/// Records the payment, takes one seat on the class, and clears the cart
/// entry, in that order. A sold-out class or missing cart entry shows up as
/// a zero count in the receipt rather than an error.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = SettlePaymentBody,
    responses(
        (status = 201, description = "Settlement receipt", body = SettlementReceipt),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "settlePayment",
    security(("BearerToken" = []))
)]
#[post("/payments")]
pub async fn settle_payment(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<SettlePaymentBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let email = parse_email(body.email, EMAIL_FIELD)?;
    require_self(identity.claim(), &email)?;
    let class_id = parse_uuid(body.class_id, CLASS_ID_FIELD)?;
    let cart_entry_id = parse_uuid(body.cart_entry_id, CART_ENTRY_ID_FIELD)?;
    let paid_at = parse_optional_rfc3339_timestamp(body.paid_at, PAID_AT_FIELD)?;

    let receipt = state
        .checkout
        .settle(PaymentDraft {
            email,
            class_id,
            cart_entry_id,
            amount_cents: body.amount_cents,
            paid_at,
        })
        .await?;
    Ok(HttpResponse::Created().json(receipt))
}

/// The caller's payment history, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    params(
        ("email" = String, Query, description = "Caller's own email")
    ),
    responses(
        (status = 200, description = "Payment history", body = [PaymentRecord]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "listPayments",
    security(("BearerToken" = []))
)]
#[get("/payments")]
pub async fn payment_history(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    query: web::Query<PaymentHistoryQuery>,
) -> ApiResult<HttpResponse> {
    let raw = query
        .into_inner()
        .email
        .ok_or_else(|| missing_field_error(EMAIL_FIELD))?;
    let email = parse_email(raw, EMAIL_FIELD)?;
    require_self(identity.claim(), &email)?;

    let history = state.payments_query.history_for(&email).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(history))
}

#[cfg(test)]
#[path = "payments_tests.rs"]
mod tests;
