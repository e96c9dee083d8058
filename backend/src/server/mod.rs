//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, StripeSettings};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use instruplay_backend::Trace;
#[cfg(debug_assertions)]
use instruplay_backend::doc::ApiDoc;
use instruplay_backend::inbound::http::carts::{add_cart_entry, list_cart, remove_cart_entry};
use instruplay_backend::inbound::http::classes::{
    approve_class, create_class, list_all_classes, list_classes, my_classes,
};
use instruplay_backend::inbound::http::health::{HealthState, live, ready};
use instruplay_backend::inbound::http::home::home;
use instruplay_backend::inbound::http::payments::{
    create_payment_intent, payment_history, settle_payment,
};
use instruplay_backend::inbound::http::state::HttpState;
use instruplay_backend::inbound::http::tokens::issue_token;
use instruplay_backend::inbound::http::users::{
    check_admin, check_instructor, get_user, list_instructors, list_users, promote_to_admin,
    promote_to_instructor, register_user,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(register_user)
        .service(list_users)
        .service(list_instructors)
        .service(get_user)
        .service(promote_to_instructor)
        .service(promote_to_admin)
        .service(check_admin)
        .service(check_instructor)
        .service(list_classes)
        .service(my_classes)
        .service(create_class)
        .service(list_all_classes)
        .service(approve_class)
        .service(list_cart)
        .service(add_cart_entry)
        .service(remove_cart_entry)
        .service(create_payment_intent)
        .service(settle_payment)
        .service(payment_history)
        .service(issue_token);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(home)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Build the Prometheus middleware serving request metrics on `/metrics`.
#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("metrics middleware construction failed: {e}")))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing binding, persistence, and
///   payment gateway settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    #[cfg(feature = "metrics")]
    let metrics = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
