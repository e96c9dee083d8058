//! Builders for the HTTP state ports.
//!
//! Each builder selects the repository-backed service when a database pool
//! is configured and falls back to the fixture port otherwise, so the server
//! can boot for smoke tests without external infrastructure.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use instruplay_backend::domain::ports::{
    CartsCommand, CartsQuery, CheckoutCommand, ClassesCommand, ClassesQuery,
    FixtureCartsCommand, FixtureCartsQuery, FixtureCheckoutCommand, FixtureClassesCommand,
    FixtureClassesQuery, FixturePaymentGateway, FixturePaymentsQuery, FixtureRoleAuthorizer,
    FixtureUsersCommand, FixtureUsersQuery, PaymentGateway, PaymentsQuery, RoleAuthorizer,
    TokenService, UsersCommand, UsersQuery,
};
use instruplay_backend::domain::{
    CartService, ClassCatalogueService, RoleAuthorizerService, SettlementCoordinator,
    TokenAuthority, UserDirectoryService,
};
use instruplay_backend::inbound::http::state::HttpState;
use instruplay_backend::outbound::persistence::{
    DbPool, DieselCartRepository, DieselClassRepository, DieselPaymentRepository,
    DieselUserRepository,
};
use instruplay_backend::outbound::stripe::StripeHttpGateway;

use super::ServerConfig;

/// Ports derived from the user repository.
struct UserPorts {
    users: Arc<dyn UsersCommand>,
    users_query: Arc<dyn UsersQuery>,
    authorizer: Arc<dyn RoleAuthorizer>,
}

fn build_user_ports(pool: &DbPool) -> UserPorts {
    let repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let directory = Arc::new(UserDirectoryService::new(repo.clone()));
    UserPorts {
        users: directory.clone(),
        users_query: directory,
        authorizer: Arc::new(RoleAuthorizerService::new(repo)),
    }
}

fn fixture_user_ports() -> UserPorts {
    UserPorts {
        users: Arc::new(FixtureUsersCommand),
        users_query: Arc::new(FixtureUsersQuery),
        authorizer: Arc::new(FixtureRoleAuthorizer),
    }
}

fn build_class_ports(pool: &DbPool) -> (Arc<dyn ClassesCommand>, Arc<dyn ClassesQuery>) {
    let repo = Arc::new(DieselClassRepository::new(pool.clone()));
    let catalogue = Arc::new(ClassCatalogueService::new(repo, Arc::new(DefaultClock)));
    (catalogue.clone(), catalogue)
}

fn build_cart_ports(pool: &DbPool) -> (Arc<dyn CartsCommand>, Arc<dyn CartsQuery>) {
    let repo = Arc::new(DieselCartRepository::new(pool.clone()));
    let carts = Arc::new(CartService::new(repo, Arc::new(DefaultClock)));
    (carts.clone(), carts)
}

/// Build the checkout coordinator over the configured gateway.
///
/// The coordinator is generic over its gateway, so both the Stripe-backed
/// and fixture-backed variants are constructed here and erased to the
/// driving ports.
fn build_checkout_ports(
    config: &ServerConfig,
    pool: &DbPool,
) -> std::io::Result<(Arc<dyn CheckoutCommand>, Arc<dyn PaymentsQuery>)> {
    match &config.stripe {
        Some(stripe) => {
            let gateway =
                StripeHttpGateway::new(stripe.endpoint.clone(), stripe.secret_key.clone())
                    .map_err(|err| {
                        std::io::Error::other(format!("stripe gateway construction failed: {err}"))
                    })?;
            Ok(coordinator_ports(pool, gateway))
        }
        None => Ok(coordinator_ports(pool, FixturePaymentGateway)),
    }
}

fn coordinator_ports<G>(
    pool: &DbPool,
    gateway: G,
) -> (Arc<dyn CheckoutCommand>, Arc<dyn PaymentsQuery>)
where
    G: PaymentGateway + 'static,
{
    let coordinator = Arc::new(SettlementCoordinator::new(
        Arc::new(DieselPaymentRepository::new(pool.clone())),
        Arc::new(DieselClassRepository::new(pool.clone())),
        Arc::new(DieselCartRepository::new(pool.clone())),
        Arc::new(gateway),
        Arc::new(DefaultClock),
    ));
    (coordinator.clone(), coordinator)
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// # Errors
///
/// Fails when the Stripe gateway client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let tokens: Arc<dyn TokenService> = Arc::new(TokenAuthority::new(
        config.token_secret.as_bytes().to_vec(),
        Arc::new(DefaultClock),
    ));

    let state = match &config.db_pool {
        Some(pool) => {
            let UserPorts {
                users,
                users_query,
                authorizer,
            } = build_user_ports(pool);
            let (classes, classes_query) = build_class_ports(pool);
            let (carts, carts_query) = build_cart_ports(pool);
            let (checkout, payments_query) = build_checkout_ports(config, pool)?;
            HttpState {
                tokens,
                authorizer,
                users,
                users_query,
                classes,
                classes_query,
                carts,
                carts_query,
                checkout,
                payments_query,
            }
        }
        None => {
            let UserPorts {
                users,
                users_query,
                authorizer,
            } = fixture_user_ports();
            HttpState {
                tokens,
                authorizer,
                users,
                users_query,
                classes: Arc::new(FixtureClassesCommand),
                classes_query: Arc::new(FixtureClassesQuery),
                carts: Arc::new(FixtureCartsCommand),
                carts_query: Arc::new(FixtureCartsQuery),
                checkout: Arc::new(FixtureCheckoutCommand),
                payments_query: Arc::new(FixturePaymentsQuery),
            }
        }
    };

    Ok(web::Data::new(state))
}
