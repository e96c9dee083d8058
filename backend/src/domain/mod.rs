//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the ports at the hexagon's edges, and the services
//! implementing those ports. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Layout:
//! - Entities and value types: [`user`], [`class`], [`cart`], [`payment`].
//! - Credentials: [`auth`] issues and verifies bearer tokens.
//! - Ports: [`ports`] declares the driving and driven traits.
//! - Services: [`registry`], [`authorization`], [`catalogue`],
//!   [`cart_service`], and [`settlement`] implement the driving ports over
//!   repositories.

pub mod auth;
pub mod authorization;
pub mod cart;
pub mod cart_service;
pub mod catalogue;
pub mod class;
pub mod error;
pub mod payment;
pub mod ports;
pub mod registry;
pub mod settlement;
pub mod user;

pub use self::auth::{Claim, TOKEN_TTL_DAYS, TokenAuthority, UNAUTHORIZED_MESSAGE};
pub use self::authorization::{FORBIDDEN_MESSAGE, RoleAuthorizerService, require_self};
pub use self::cart::{CartEntry, CartEntryDraft};
pub use self::cart_service::CartService;
pub use self::catalogue::ClassCatalogueService;
pub use self::class::{Class, ClassDraft, ClassStatus, UnknownClassStatus};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::payment::{PaymentDraft, PaymentRecord, SettlementReceipt};
pub use self::registry::UserDirectoryService;
pub use self::settlement::SettlementCoordinator;
pub use self::user::{EmailAddress, Role, User, UserId, UserName, UserValidationError};
