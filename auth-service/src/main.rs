// Auth service entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service::{app, Account, AccountStore};
use bazaar_config::Config;

fn seed_accounts() -> Vec<Account> {
    vec![Account {
        id: 1,
        name: "Ada Lovelace".to_string(),
        telephone_number: "555-0100".to_string(),
        address: "12 Analytical Row".to_string(),
        email: "ada@example.com".to_string(),
        password: "not-a-real-password".to_string(),
        role: "Customer".to_string(),
    }]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Auth Service Starting ===");

    let store = Arc::new(AccountStore::seeded(seed_accounts()));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Auth Service listening on {}", config.bind_address);

    axum::serve(listener, app(store))
        .with_graceful_shutdown(bazaar_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
