//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod carts;
pub mod classes;
pub mod error;
pub mod health;
pub mod home;
pub mod payments;
pub mod state;
pub mod token_config;
pub mod tokens;
pub mod users;
pub mod validation;

pub use error::ApiResult;
