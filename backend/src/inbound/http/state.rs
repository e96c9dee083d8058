//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CartsCommand, CartsQuery, CheckoutCommand, ClassesCommand, ClassesQuery, PaymentsQuery,
    RoleAuthorizer, TokenService, UsersCommand, UsersQuery,
};
use crate::domain::ports::{
    FixtureCartsCommand, FixtureCartsQuery, FixtureCheckoutCommand, FixtureClassesCommand,
    FixtureClassesQuery, FixturePaymentsQuery, FixtureRoleAuthorizer, FixtureTokenService,
    FixtureUsersCommand, FixtureUsersQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// Every field is a driving or driven port; the default wiring uses the
/// fixture implementations so handler tests can swap in exactly the mocks
/// they care about.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use instruplay_backend::domain::ports::FixtureUsersQuery;
/// use instruplay_backend::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     users_query: Arc::new(FixtureUsersQuery),
///     ..HttpState::default()
/// };
/// let _users = state.users_query.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub tokens: Arc<dyn TokenService>,
    pub authorizer: Arc<dyn RoleAuthorizer>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub classes: Arc<dyn ClassesCommand>,
    pub classes_query: Arc<dyn ClassesQuery>,
    pub carts: Arc<dyn CartsCommand>,
    pub carts_query: Arc<dyn CartsQuery>,
    pub checkout: Arc<dyn CheckoutCommand>,
    pub payments_query: Arc<dyn PaymentsQuery>,
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            tokens: Arc::new(FixtureTokenService),
            authorizer: Arc::new(FixtureRoleAuthorizer),
            users: Arc::new(FixtureUsersCommand),
            users_query: Arc::new(FixtureUsersQuery),
            classes: Arc::new(FixtureClassesCommand),
            classes_query: Arc::new(FixtureClassesQuery),
            carts: Arc::new(FixtureCartsCommand),
            carts_query: Arc::new(FixtureCartsQuery),
            checkout: Arc::new(FixtureCheckoutCommand),
            payments_query: Arc::new(FixturePaymentsQuery),
        }
    }
}
