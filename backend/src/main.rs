//! Backend entry-point: configuration, migrations, and server startup.

mod server;

use std::env;

use actix_web::web;
use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use instruplay_backend::inbound::http::health::HealthState;
use instruplay_backend::inbound::http::token_config::{BuildMode, token_secret_from_env};
use instruplay_backend::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, StripeSettings, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STRIPE_ENDPOINT: &str = "https://api.stripe.com/v1/payment_intents";

/// Apply pending migrations before the listener starts.
///
/// Diesel's migration harness is synchronous, so the async connection is
/// wrapped and the whole run moved onto a blocking thread.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&database_url).map_err(|e| {
                std::io::Error::other(format!("database connection for migrations failed: {e}"))
            })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("running migrations failed: {e}")))?;
        info!(count = applied.len(), "migrations applied");
        Ok(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task panicked: {e}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let token_secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %token_secret.fingerprint(), "token signing secret loaded");

    let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let bind_addr = raw_addr
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR '{raw_addr}': {e}")))?;

    let mut config = ServerConfig::new(bind_addr, token_secret);

    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            run_migrations(database_url.clone()).await?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        Err(_) => warn!("DATABASE_URL not set; serving fixture data only"),
    }

    match env::var("STRIPE_SECRET_KEY") {
        Ok(secret_key) => {
            let endpoint =
                env::var("STRIPE_PAYMENT_INTENTS_URL").unwrap_or_else(|_| DEFAULT_STRIPE_ENDPOINT.into());
            let endpoint = endpoint.parse().map_err(|e| {
                std::io::Error::other(format!("invalid STRIPE_PAYMENT_INTENTS_URL: {e}"))
            })?;
            config = config.with_stripe(StripeSettings {
                endpoint,
                secret_key,
            });
        }
        Err(_) => warn!("STRIPE_SECRET_KEY not set; payment intents use fixture responses"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
