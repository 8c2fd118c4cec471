// ============================================================================
// Order Service
// ============================================================================
//
// Order API plus the cross-service aggregation layer. All /api routes
// sit behind the gateway trust boundary; the fault translation stack
// wraps the entire router.
//
// ============================================================================

pub mod handlers;
pub mod repository;
pub mod service;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use bazaar_shared::middleware::{handle_panic, require_gateway, translate_status};

use crate::repository::OrderRepository;
use crate::service::OrderAggregator;

/// Collaborators shared by all order handlers.
pub struct OrderContext {
    pub repository: Arc<dyn OrderRepository>,
    pub aggregator: OrderAggregator,
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Build the order service router.
pub fn app(context: Arc<OrderContext>) -> Router {
    let guarded = Router::new()
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/api/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/api/orders/:id/details", get(handlers::get_order_details))
        .route(
            "/api/orders/client/:client_id",
            get(handlers::get_client_orders),
        )
        .layer(middleware::from_fn(require_gateway))
        .with_state(context);

    Router::new()
        .route("/health", get(health_check))
        .merge(guarded)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(middleware::from_fn(translate_status))
                .into_inner(),
        )
}
