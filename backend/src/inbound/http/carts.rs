//! Shopping cart API handlers.
//!
//! ```text
//! GET /api/v1/carts?email=
//! POST /api/v1/carts {"email":"ada@example.com","classId":"…"}
//! DELETE /api/v1/carts/{id}
//! ```
//!
//! Every cart operation requires a bearer token, and the email in the query
//! or body must match the verified claim. Listing without an email answers
//! an empty cart rather than an error; removal answers the affected-row
//! count, which is zero when the entry is unknown or owned by someone else.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{CartEntry, CartEntryDraft, Error, require_self};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, parse_uuid};

const EMAIL_FIELD: FieldName = FieldName::new("email");
const CLASS_ID_FIELD: FieldName = FieldName::new("classId");
const CART_ID_FIELD: FieldName = FieldName::new("id");

/// Query parameters for `GET /api/v1/carts`.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    email: Option<String>,
}

/// Request body for `POST /api/v1/carts`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartEntryBody {
    pub email: String,
    pub class_id: String,
}

/// Affected-row count returned by the removal endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CartRemovalReply {
    pub removed: u64,
}

/// The caller's saved cart entries.
#[utoipa::path(
    get,
    path = "/api/v1/carts",
    params(
        ("email" = Option<String>, Query, description = "Caller's own email; empty cart when omitted")
    ),
    responses(
        (status = 200, description = "Cart entries", body = [CartEntry]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["carts"],
    operation_id = "listCart",
    security(("BearerToken" = []))
)]
#[get("/carts")]
pub async fn list_cart(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    query: web::Query<CartQuery>,
) -> ApiResult<HttpResponse> {
    let entries = match query.into_inner().email {
        Some(raw) => {
            let email = parse_email(raw, EMAIL_FIELD)?;
            require_self(identity.claim(), &email)?;
            state.carts_query.list_entries(&email).await?
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(entries))
}

/// Save a class to the caller's cart.
#[utoipa::path(
    post,
    path = "/api/v1/carts",
    request_body = AddCartEntryBody,
    responses(
        (status = 201, description = "Entry saved", body = CartEntry),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["carts"],
    operation_id = "addCartEntry",
    security(("BearerToken" = []))
)]
#[post("/carts")]
pub async fn add_cart_entry(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<AddCartEntryBody>,
) -> ApiResult<HttpResponse> {
    let AddCartEntryBody { email, class_id } = payload.into_inner();
    let email = parse_email(email, EMAIL_FIELD)?;
    require_self(identity.claim(), &email)?;
    let class_id = parse_uuid(class_id, CLASS_ID_FIELD)?;

    let entry = state
        .carts
        .add_entry(CartEntryDraft { email, class_id })
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Remove a cart entry owned by the caller.
///
/// The owner scope comes from the verified claim, so deleting someone else's
/// entry quietly reports `removed: 0`.
#[utoipa::path(
    delete,
    path = "/api/v1/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart entry identifier")
    ),
    responses(
        (status = 200, description = "Rows removed", body = CartRemovalReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["carts"],
    operation_id = "removeCartEntry",
    security(("BearerToken" = []))
)]
#[delete("/carts/{id}")]
pub async fn remove_cart_entry(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<CartRemovalReply>> {
    let entry_id = parse_uuid(path.into_inner(), CART_ID_FIELD)?;
    let response = state
        .carts
        .remove_entry(entry_id, identity.claim().email())
        .await?;
    Ok(web::Json(CartRemovalReply {
        removed: response.removed,
    }))
}

#[cfg(test)]
#[path = "carts_tests.rs"]
mod tests;
