//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use instruplay_backend::inbound::http::token_config::TokenSecret;
use instruplay_backend::outbound::persistence::DbPool;

/// Stripe connection settings for the payment gateway adapter.
pub struct StripeSettings {
    /// Payment-intent endpoint, injectable for tests.
    pub endpoint: reqwest::Url,
    /// Secret API key used as the bearer credential.
    pub secret_key: String,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) stripe: Option<StripeSettings>,
}

impl ServerConfig {
    /// Construct a server configuration with the mandatory settings.
    ///
    /// Persistence and the payment gateway default to fixture wiring until
    /// [`ServerConfig::with_db_pool`] and [`ServerConfig::with_stripe`]
    /// attach the real adapters.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret) -> Self {
        Self {
            bind_addr,
            token_secret,
            db_pool: None,
            stripe: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach Stripe settings for the payment gateway adapter.
    #[must_use]
    pub fn with_stripe(mut self, stripe: StripeSettings) -> Self {
        self.stripe = Some(stripe);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
