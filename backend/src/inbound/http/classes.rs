//! Class catalogue API handlers.
//!
//! ```text
//! GET /api/v1/classes
//! GET /api/v1/classes/my-classes?email=   (instructor, self)
//! POST /api/v1/classes                    (instructor)
//! GET /api/v1/classes/all                 (admin)
//! PATCH /api/v1/classes/approve/{id}      (admin)
//! ```
//!
//! The public catalogue only shows approved listings; everything else sits
//! behind a bearer token plus a role check. Listing submission takes the
//! instructor email from the verified claim, never from the request body.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Class, ClassDraft, Error, Role, require_self};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_email, parse_uuid};

const EMAIL_FIELD: FieldName = FieldName::new("email");
const CLASS_ID_FIELD: FieldName = FieldName::new("id");

/// Query parameters for `GET /api/v1/classes/my-classes`.
#[derive(Debug, Deserialize)]
pub struct MyClassesQuery {
    email: Option<String>,
}

/// Listing submission body for `POST /api/v1/classes`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassBody {
    pub name: String,
    pub instructor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub available_seats: i32,
    pub price_cents: i64,
}

/// Affected-row count returned by the approval endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ModerationReply {
    pub updated: u64,
}

/// Public catalogue of approved classes, most popular first.
#[utoipa::path(
    get,
    path = "/api/v1/classes",
    responses(
        (status = 200, description = "Approved classes sorted by enrolment", body = [Class]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["classes"],
    operation_id = "listClasses",
    security([])
)]
#[get("/classes")]
pub async fn list_classes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Class>>> {
    let classes = state.classes_query.list_public().await?;
    Ok(web::Json(classes))
}

/// The calling instructor's own listings.
///
/// The email query parameter must match the verified claim; the ownership
/// check runs before the role lookup so a cross-user request fails closed
/// without touching storage.
#[utoipa::path(
    get,
    path = "/api/v1/classes/my-classes",
    params(
        ("email" = String, Query, description = "Caller's own email")
    ),
    responses(
        (status = 200, description = "The caller's listings", body = [Class]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["classes"],
    operation_id = "myClasses",
    security(("BearerToken" = []))
)]
#[get("/classes/my-classes")]
pub async fn my_classes(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    query: web::Query<MyClassesQuery>,
) -> ApiResult<HttpResponse> {
    let raw_email = query
        .into_inner()
        .email
        .ok_or_else(|| missing_field_error(EMAIL_FIELD))?;
    let email = parse_email(raw_email, EMAIL_FIELD)?;
    require_self(identity.claim(), &email)?;
    state
        .authorizer
        .authorize(identity.claim(), Role::Instructor)
        .await?;

    let classes = state.classes_query.list_for_instructor(&email).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(classes))
}

/// Submit a new listing. Instructors only; stored as pending until approved.
#[utoipa::path(
    post,
    path = "/api/v1/classes",
    request_body = CreateClassBody,
    responses(
        (status = 201, description = "Listing stored as pending", body = Class),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["classes"],
    operation_id = "createClass",
    security(("BearerToken" = []))
)]
#[post("/classes")]
pub async fn create_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<CreateClassBody>,
) -> ApiResult<HttpResponse> {
    state
        .authorizer
        .authorize(identity.claim(), Role::Instructor)
        .await?;

    let CreateClassBody {
        name,
        instructor_name,
        image_url,
        available_seats,
        price_cents,
    } = payload.into_inner();
    let draft = ClassDraft {
        name,
        instructor_email: identity.claim().email().clone(),
        instructor_name,
        image_url,
        available_seats,
        price_cents,
    };

    let class = state.classes.create_class(draft).await?;
    Ok(HttpResponse::Created().json(class))
}

/// Every listing regardless of status, for the moderation board. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/classes/all",
    responses(
        (status = 200, description = "All listings", body = [Class]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["classes"],
    operation_id = "listAllClasses",
    security(("BearerToken" = []))
)]
#[get("/classes/all")]
pub async fn list_all_classes(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
) -> ApiResult<web::Json<Vec<Class>>> {
    state
        .authorizer
        .authorize(identity.claim(), Role::Admin)
        .await?;
    let classes = state.classes_query.list_all().await?;
    Ok(web::Json(classes))
}

/// Approve a pending listing. Admin only.
///
/// Approving an unknown id reports `updated: 0` instead of failing.
#[utoipa::path(
    patch,
    path = "/api/v1/classes/approve/{id}",
    params(
        ("id" = String, Path, description = "Class identifier")
    ),
    responses(
        (status = 200, description = "Rows updated", body = ModerationReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["classes"],
    operation_id = "approveClass",
    security(("BearerToken" = []))
)]
#[patch("/classes/approve/{id}")]
pub async fn approve_class(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<ModerationReply>> {
    state
        .authorizer
        .authorize(identity.claim(), Role::Admin)
        .await?;
    let class_id = parse_uuid(path.into_inner(), CLASS_ID_FIELD)?;
    let response = state.classes.approve_class(class_id).await?;
    Ok(web::Json(ModerationReply {
        updated: response.updated,
    }))
}

#[cfg(test)]
#[path = "classes_tests.rs"]
mod tests;
