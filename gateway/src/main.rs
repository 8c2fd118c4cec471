// API Gateway entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_config::Config;
use gateway::{app, GatewayState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== API Gateway Starting ===");

    let http = bazaar_shared::clients::http_client(Duration::from_secs(
        config.upstream.service_timeout_secs,
    ));
    let state = Arc::new(GatewayState::new(http, &config.upstream));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("API Gateway listening on {}", config.bind_address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(bazaar_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
