//! Warden application composition root
//!
//! Builds the shared state from configuration and composes the accounts
//! router with the infrastructure routes.

use std::sync::Arc;

use axum::{http::Uri, Router};
use sqlx::postgres::PgPoolOptions;
use warden_accounts::{AccountStore, AccountsState, InMemoryAccountStore, PgAccountStore};
use warden_auth::{AuthConfig, TokenAuthority};
use warden_common::Config;
use warden_email::{EmailConfig, EmailService, EmailServiceFactory};

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Pick the account store: Postgres when `DATABASE_URL` is set, memory otherwise
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn AccountStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
        return Ok(Arc::new(InMemoryAccountStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
    tracing::info!("Database connection established");

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgAccountStore::new(pool)))
}

/// Build the accounts state; the signing secret is injected here once
pub fn build_state(
    config: &Config,
    store: Arc<dyn AccountStore>,
    email: Arc<dyn EmailService>,
) -> anyhow::Result<AccountsState> {
    let auth_config = AuthConfig::new(config.jwt_secret.clone(), config.jwt_issuer.clone())?;

    Ok(AccountsState {
        store,
        tokens: TokenAuthority::new(&auth_config),
        email,
        app_base_url: config.app_base_url.clone(),
    })
}

/// Wire everything from configuration
pub async fn bootstrap(config: &Config) -> anyhow::Result<Router> {
    let store = connect_store(config).await?;

    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;
    tracing::info!(provider = email_service.service_name(), "Email service ready");

    let state = build_state(config, store, Arc::from(email_service))?;
    Ok(create_app(state))
}

/// Create the main application router with all routes
pub fn create_app(state: AccountsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(banner))
        .merge(warden_accounts::routes().with_state(state))
        .fallback(no_route)
}

/// Unknown paths answer in the common error shape
async fn no_route(uri: Uri) -> warden_common::Error {
    warden_common::Error::NotFound(format!("No route for {}", uri.path()))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn banner() -> String {
    format!("Warden API v{}", env!("CARGO_PKG_VERSION"))
}
