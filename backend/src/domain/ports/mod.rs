//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_repository;
mod carts_command;
mod carts_query;
mod checkout_command;
mod class_repository;
mod classes_command;
mod classes_query;
mod payment_gateway;
mod payment_repository;
mod payments_query;
mod role_authorizer;
mod token_service;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, CartRepositoryError, FixtureCartRepository};
#[cfg(test)]
pub use carts_command::MockCartsCommand;
pub use carts_command::{CartRemovalResponse, CartsCommand, FixtureCartsCommand};
#[cfg(test)]
pub use carts_query::MockCartsQuery;
pub use carts_query::{CartsQuery, FixtureCartsQuery};
#[cfg(test)]
pub use checkout_command::MockCheckoutCommand;
pub use checkout_command::{CheckoutCommand, FixtureCheckoutCommand};
#[cfg(test)]
pub use class_repository::MockClassRepository;
pub use class_repository::{ClassRepository, ClassRepositoryError, FixtureClassRepository};
#[cfg(test)]
pub use classes_command::MockClassesCommand;
pub use classes_command::{ClassModerationResponse, ClassesCommand, FixtureClassesCommand};
#[cfg(test)]
pub use classes_query::MockClassesQuery;
pub use classes_query::{ClassesQuery, FixtureClassesQuery};
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
pub use payment_gateway::{
    FixturePaymentGateway, PaymentGateway, PaymentGatewayError, PaymentIntent,
    PaymentIntentRequest,
};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::{FixturePaymentRepository, PaymentRepository, PaymentRepositoryError};
#[cfg(test)]
pub use payments_query::MockPaymentsQuery;
pub use payments_query::{FixturePaymentsQuery, PaymentsQuery};
#[cfg(test)]
pub use role_authorizer::MockRoleAuthorizer;
pub use role_authorizer::{FixtureRoleAuthorizer, RoleAuthorizer};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, IssuedToken, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub(crate) use users_command::invalid_user_payload;
pub use users_command::{
    FixtureUsersCommand, RegisterUserRequest, RegisterUserResponse, RoleUpdateResponse,
    UsersCommand,
};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};

#[cfg(test)]
mod tests;
