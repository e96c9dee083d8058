//! User directory API handlers.
//!
//! ```text
//! POST /api/v1/users {"name":"Ada Lovelace","email":"ada@example.com"}
//! GET /api/v1/users/ada@example.com
//! GET /api/v1/users                     (admin)
//! GET /api/v1/instructors
//! PATCH /api/v1/users/instructor/{id}   (admin)
//! PATCH /api/v1/users/admin/{id}        (admin)
//! GET /api/v1/users/admin/{email}       (self)
//! GET /api/v1/users/instructor/{email}  (self)
//! ```
//!
//! Registration is public and idempotent; repeating it surfaces the stored
//! account with an "already exists" notice instead of failing. Role checks
//! are self-access only and answer with a bare flag so the endpoint reveals
//! nothing about other accounts.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{Error, Role, User, require_self};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, parse_uuid};

/// Notice returned when a registration hits an existing account.
pub const ALREADY_REGISTERED_MESSAGE: &str = "user already exists";

const EMAIL_FIELD: FieldName = FieldName::new("email");
const USER_ID_FIELD: FieldName = FieldName::new("id");

/// Registration request body for `POST /api/v1/users`.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    pub name: String,
    pub email: String,
    /// Requested role; omitted registrations start with no elevated access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Registration response; `message` is only present for repeat registrations.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserReply {
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: User,
}

/// Affected-row count returned by the promotion endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RoleUpdateReply {
    pub updated: u64,
}

/// Self-check response for `GET /api/v1/users/admin/{email}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminFlag {
    pub admin: bool,
}

/// Self-check response for `GET /api/v1/users/instructor/{email}`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InstructorFlag {
    pub instructor: bool,
}

fn invalid_role_error(value: &str) -> Error {
    Error::invalid_request("role must be one of none, instructor or admin").with_details(json!({
        "field": "role",
        "value": value,
        "code": "unknown_role",
    }))
}

/// Register a new account, or surface the stored one when the email is taken.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "Account created", body = RegisterUserReply),
        (status = 200, description = "Account already existed", body = RegisterUserReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let RegisterUserBody { name, email, role } = payload.into_inner();
    let role = match role.as_deref() {
        Some(raw) => raw.parse().map_err(|_| invalid_role_error(raw))?,
        None => Role::default(),
    };

    let response = state
        .users
        .register(RegisterUserRequest { name, email, role })
        .await?;

    let mut builder = if response.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(builder.json(RegisterUserReply {
        created: response.created,
        message: (!response.created).then(|| ALREADY_REGISTERED_MESSAGE.to_owned()),
        user: response.user,
    }))
}

/// Fetch a single account by email.
///
/// Unknown emails answer `200` with a `null` body rather than `404`; clients
/// treat an empty record as "not registered yet".
#[utoipa::path(
    get,
    path = "/api/v1/users/{email}",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    responses(
        (status = 200, description = "The account, or null when unknown", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{email}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let email = parse_email(path.into_inner(), EMAIL_FIELD)?;
    let user = state.users_query.find_user(&email).await?;
    Ok(web::Json(user))
}

/// List every registered account. Administrators only.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All accounts", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("BearerToken" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
) -> ApiResult<web::Json<Vec<User>>> {
    state
        .authorizer
        .authorize(identity.claim(), Role::Admin)
        .await?;
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// List accounts holding the instructor role.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use instruplay_backend::inbound::http::users::list_instructors;
///
/// let app = App::new().service(list_instructors);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/instructors",
    responses(
        (status = 200, description = "Instructor accounts", body = [User]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listInstructors",
    security([])
)]
#[get("/instructors")]
pub async fn list_instructors(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let instructors = state
        .users_query
        .list_users_by_role(Role::Instructor)
        .await?;
    Ok(web::Json(instructors))
}

async fn promote(
    state: &HttpState,
    identity: &BearerIdentity,
    raw_id: String,
    role: Role,
) -> ApiResult<web::Json<RoleUpdateReply>> {
    state
        .authorizer
        .authorize(identity.claim(), Role::Admin)
        .await?;
    let user_id = parse_uuid(raw_id, USER_ID_FIELD)?;
    let response = state.users.promote(user_id, role).await?;
    Ok(web::Json(RoleUpdateReply {
        updated: response.updated,
    }))
}

/// Grant the instructor role. Administrators only.
///
/// Answers with the affected-row count; promoting an unknown id reports
/// `updated: 0` instead of failing.
#[utoipa::path(
    patch,
    path = "/api/v1/users/instructor/{id}",
    params(
        ("id" = String, Path, description = "Account identifier")
    ),
    responses(
        (status = 200, description = "Rows updated", body = RoleUpdateReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "promoteToInstructor",
    security(("BearerToken" = []))
)]
#[patch("/users/instructor/{id}")]
pub async fn promote_to_instructor(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoleUpdateReply>> {
    promote(&state, &identity, path.into_inner(), Role::Instructor).await
}

/// Grant the admin role. Administrators only.
#[utoipa::path(
    patch,
    path = "/api/v1/users/admin/{id}",
    params(
        ("id" = String, Path, description = "Account identifier")
    ),
    responses(
        (status = 200, description = "Rows updated", body = RoleUpdateReply),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "promoteToAdmin",
    security(("BearerToken" = []))
)]
#[patch("/users/admin/{id}")]
pub async fn promote_to_admin(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoleUpdateReply>> {
    promote(&state, &identity, path.into_inner(), Role::Admin).await
}

async fn role_flag(
    state: &HttpState,
    identity: &BearerIdentity,
    raw_email: String,
) -> ApiResult<Role> {
    let email = parse_email(raw_email, EMAIL_FIELD)?;
    require_self(identity.claim(), &email)?;
    state.users_query.role_of(&email).await
}

/// Report whether the caller's own account holds the admin role.
#[utoipa::path(
    get,
    path = "/api/v1/users/admin/{email}",
    params(
        ("email" = String, Path, description = "Caller's own email")
    ),
    responses(
        (status = 200, description = "Admin flag", body = AdminFlag),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "checkAdmin",
    security(("BearerToken" = []))
)]
#[get("/users/admin/{email}")]
pub async fn check_admin(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let role = role_flag(&state, &identity, path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(AdminFlag {
            admin: role == Role::Admin,
        }))
}

/// Report whether the caller's own account holds the instructor role.
#[utoipa::path(
    get,
    path = "/api/v1/users/instructor/{email}",
    params(
        ("email" = String, Path, description = "Caller's own email")
    ),
    responses(
        (status = 200, description = "Instructor flag", body = InstructorFlag),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "checkInstructor",
    security(("BearerToken" = []))
)]
#[get("/users/instructor/{email}")]
pub async fn check_instructor(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let role = role_flag(&state, &identity, path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(InstructorFlag {
            instructor: role == Role::Instructor,
        }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
