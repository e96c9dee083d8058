//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, classes,
//!   carts, payments, tokens, health)
//! - **Schemas**: Domain types and handler bodies that carry `ToSchema`
//!   derives
//! - **Security**: Bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CartEntry, Class, ClassStatus, Error, PaymentRecord, Role, SettlementReceipt, User,
};
use crate::inbound::http::carts::{AddCartEntryBody, CartRemovalReply};
use crate::inbound::http::classes::{CreateClassBody, ModerationReply};
use crate::inbound::http::payments::{
    CreateIntentBody, PaymentIntentReply, SettlePaymentBody,
};
use crate::inbound::http::tokens::{IssueTokenBody, IssueTokenReply};
use crate::inbound::http::users::{
    AdminFlag, InstructorFlag, RegisterUserBody, RegisterUserReply, RoleUpdateReply,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Signed token issued by POST /api/v1/jwt."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "InstruPlay backend API",
        description = "HTTP interface for the music-class marketplace: accounts, \
            listings, carts, checkout, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::list_instructors,
        crate::inbound::http::users::promote_to_instructor,
        crate::inbound::http::users::promote_to_admin,
        crate::inbound::http::users::check_admin,
        crate::inbound::http::users::check_instructor,
        crate::inbound::http::classes::list_classes,
        crate::inbound::http::classes::my_classes,
        crate::inbound::http::classes::create_class,
        crate::inbound::http::classes::list_all_classes,
        crate::inbound::http::classes::approve_class,
        crate::inbound::http::carts::list_cart,
        crate::inbound::http::carts::add_cart_entry,
        crate::inbound::http::carts::remove_cart_entry,
        crate::inbound::http::payments::create_payment_intent,
        crate::inbound::http::payments::settle_payment,
        crate::inbound::http::payments::payment_history,
        crate::inbound::http::tokens::issue_token,
        crate::inbound::http::home::home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Role,
        Class,
        ClassStatus,
        CartEntry,
        PaymentRecord,
        SettlementReceipt,
        Error,
        RegisterUserBody,
        RegisterUserReply,
        RoleUpdateReply,
        AdminFlag,
        InstructorFlag,
        CreateClassBody,
        ModerationReply,
        AddCartEntryBody,
        CartRemovalReply,
        CreateIntentBody,
        PaymentIntentReply,
        SettlePaymentBody,
        IssueTokenBody,
        IssueTokenReply,
    )),
    tags(
        (name = "users", description = "Account registration, lookup, and roles"),
        (name = "classes", description = "Class listings and moderation"),
        (name = "carts", description = "Shopping cart entries"),
        (name = "payments", description = "Payment intents, settlement, and history"),
        (name = "auth", description = "Bearer token issue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
