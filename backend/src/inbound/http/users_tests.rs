//! Tests for user directory API handlers.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::*;
use crate::domain::ports::{
    MockRoleAuthorizer, MockUsersCommand, MockUsersQuery, RegisterUserResponse, RoleUpdateResponse,
};
use crate::domain::{
    EmailAddress, FORBIDDEN_MESSAGE, UNAUTHORIZED_MESSAGE, UserId, UserName,
};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(register_user)
            .service(list_users)
            .service(list_instructors)
            .service(promote_to_instructor)
            .service(promote_to_admin)
            .service(check_admin)
            .service(check_instructor)
            .service(get_user),
    )
}

fn bearer(email: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer fixture.{email}"))
}

fn stored_user(name: &str, email: &str, role: Role) -> User {
    User::new(
        UserId::random(),
        UserName::new(name).expect("valid name"),
        EmailAddress::new(email).expect("valid email"),
        role,
    )
}

#[actix_web::test]
async fn registration_answers_created() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("created"), Some(&Value::Bool(true)));
    assert!(body.get("message").is_none());
    assert_eq!(
        body.pointer("/user/email").and_then(Value::as_str),
        Some("ada@example.com")
    );
}

#[actix_web::test]
async fn repeat_registration_surfaces_the_existing_account() {
    let existing = stored_user("Ada Lovelace", "ada@example.com", Role::None);
    let mut users = MockUsersCommand::new();
    users.expect_register().times(1).return_once(move |_| {
        Ok(RegisterUserResponse {
            created: false,
            user: existing,
        })
    });

    let state = HttpState {
        users: Arc::new(users),
        ..HttpState::default()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("created"), Some(&Value::Bool(false)));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(ALREADY_REGISTERED_MESSAGE)
    );
}

#[actix_web::test]
async fn registration_rejects_unknown_roles() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "superadmin",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("error"), Some(&Value::Bool(true)));
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("unknown_role")
    );
}

#[actix_web::test]
async fn unknown_email_lookup_answers_null() {
    let mut users_query = MockUsersQuery::new();
    users_query
        .expect_find_user()
        .times(1)
        .return_once(|_| Ok(None));

    let state = HttpState {
        users_query: Arc::new(users_query),
        ..HttpState::default()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/nobody@example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"null");
}

#[actix_web::test]
async fn malformed_email_lookup_is_rejected() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/not-an-email")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("invalid_email")
    );
}

#[actix_web::test]
async fn user_listing_requires_a_token() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("error"), Some(&Value::Bool(true)));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(UNAUTHORIZED_MESSAGE)
    );
}

#[actix_web::test]
async fn user_listing_requires_the_admin_role() {
    let mut authorizer = MockRoleAuthorizer::new();
    authorizer
        .expect_authorize()
        .times(1)
        .withf(|_, required| *required == Role::Admin)
        .return_once(|_, _| Err(Error::forbidden(FORBIDDEN_MESSAGE)));

    let state = HttpState {
        authorizer: Arc::new(authorizer),
        ..HttpState::default()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer("ada@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(FORBIDDEN_MESSAGE)
    );
}

#[actix_web::test]
async fn instructor_directory_is_public() {
    let marta = stored_user("Marta Kowalska", "marta@example.com", Role::Instructor);
    let mut users_query = MockUsersQuery::new();
    users_query
        .expect_list_users_by_role()
        .times(1)
        .withf(|role| *role == Role::Instructor)
        .return_once(move |_| Ok(vec![marta]));

    let state = HttpState {
        users_query: Arc::new(users_query),
        ..HttpState::default()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/instructors")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].get("email").and_then(Value::as_str),
        Some("marta@example.com")
    );
}

#[actix_web::test]
async fn promotion_reports_the_affected_row_count() {
    let mut users = MockUsersCommand::new();
    users
        .expect_promote()
        .times(1)
        .withf(|_, role| *role == Role::Instructor)
        .return_once(|_, _| Ok(RoleUpdateResponse { updated: 1 }));

    let state = HttpState {
        users: Arc::new(users),
        ..HttpState::default()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/v1/users/instructor/3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .insert_header(bearer("root@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("updated").and_then(Value::as_u64), Some(1));
}

#[actix_web::test]
async fn promotion_rejects_malformed_identifiers() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/v1/users/admin/not-a-uuid")
        .insert_header(bearer("root@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("invalid_uuid")
    );
}

#[actix_web::test]
async fn admin_check_answers_for_the_callers_own_email() {
    // The default fixture directory stores Ada as an admin.
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/admin/ada@example.com")
        .insert_header(bearer("ada@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok());
    assert_eq!(cache, Some("private, no-cache, must-revalidate"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("admin"), Some(&Value::Bool(true)));
}

#[actix_web::test]
async fn admin_check_refuses_other_peoples_emails() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/admin/grace@example.com")
        .insert_header(bearer("ada@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("error"), Some(&Value::Bool(true)));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(FORBIDDEN_MESSAGE)
    );
}

#[actix_web::test]
async fn instructor_check_reports_false_for_admins() {
    let app = actix_test::init_service(test_app(HttpState::default())).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/instructor/ada@example.com")
        .insert_header(bearer("ada@example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("instructor"), Some(&Value::Bool(false)));
}
