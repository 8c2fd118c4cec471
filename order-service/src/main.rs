// Order service entry point.
//
// Wires the in-memory order store, the peer clients (routed through the
// API gateway) and the retry registry into the aggregation layer, then
// serves the router until shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_config::Config;
use bazaar_shared::clients::{http_client, ProductClient, UserClient};
use bazaar_shared::retry::RetryRegistry;

use order_service::repository::{InMemoryOrders, Order};
use order_service::service::OrderAggregator;
use order_service::{app, OrderContext};

fn seed_orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            product_id: 1,
            client_id: 1,
            purchase_quantity: 2,
            order_date: Utc::now(),
        },
        Order {
            id: 2,
            product_id: 2,
            client_id: 1,
            purchase_quantity: 1,
            order_date: Utc::now(),
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

    info!("=== Order Service Starting ===");

    let repository = Arc::new(InMemoryOrders::seeded(seed_orders()));

    // Peer calls go through the gateway; internal services are not
    // reachable from here directly.
    let http = http_client(Duration::from_secs(config.upstream.service_timeout_secs));
    let products = ProductClient::new(http.clone(), config.upstream.gateway_base_url.clone());
    let users = UserClient::new(http, config.upstream.gateway_base_url.clone());

    let registry = RetryRegistry::from_config(&config.retry);
    let aggregator = OrderAggregator::new(repository.clone(), products, users, &registry)?;

    let context = Arc::new(OrderContext {
        repository,
        aggregator,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Order Service listening on {}", config.bind_address);

    axum::serve(listener, app(context))
        .with_graceful_shutdown(bazaar_shared::shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
