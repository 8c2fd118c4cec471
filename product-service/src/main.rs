// Product service entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_config::Config;
use bazaar_shared::models::ProductSnapshot;
use product_service::{app, ProductStore};

fn seed_products() -> Vec<ProductSnapshot> {
    vec![
        ProductSnapshot {
            id: 1,
            name: "Keyboard".to_string(),
            quantity: 12,
            price: 49.99,
        },
        ProductSnapshot {
            id: 2,
            name: "Monitor".to_string(),
            quantity: 4,
            price: 229.50,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Product Service Starting ===");

    let store = Arc::new(ProductStore::seeded(seed_products()));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Product Service listening on {}", config.bind_address);

    axum::serve(listener, app(store))
        .with_graceful_shutdown(bazaar_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
