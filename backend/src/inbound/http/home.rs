//! Plain-text service banner at the root path.
//!
//! Deployment dashboards and the v1 smoke checks hit `/` and expect a fixed
//! sentence rather than a structured probe; the structured probes live under
//! `/health`.

use actix_web::{HttpResponse, get};

/// Banner body returned by the root path.
pub const BANNER: &str = "InstruPlay is running";

/// Root banner used by smoke checks.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service banner", body = str))
)]
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().body(BANNER)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;

    #[actix_web::test]
    async fn banner_is_served_at_the_root() {
        let app = test::init_service(App::new().service(home)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, BANNER);
    }
}
