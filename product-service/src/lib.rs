// ============================================================================
// Product Service
// ============================================================================
//
// Product catalog peer. Serves the snapshot contract the order service
// aggregates over; reachable only through the API gateway.
//
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use bazaar_shared::middleware::{handle_panic, require_gateway, translate_status};
use bazaar_shared::models::ProductSnapshot;

/// In-memory catalog keyed by product id.
pub struct ProductStore {
    products: RwLock<HashMap<i64, ProductSnapshot>>,
    next_id: AtomicI64,
}

impl ProductStore {
    pub fn seeded(products: impl IntoIterator<Item = ProductSnapshot>) -> Self {
        let products: HashMap<i64, ProductSnapshot> =
            products.into_iter().map(|p| (p.id, p)).collect();
        let next_id = products.keys().max().copied().unwrap_or(0) + 1;
        Self {
            products: RwLock::new(products),
            next_id: AtomicI64::new(next_id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

async fn list_products(State(store): State<Arc<ProductStore>>) -> Response {
    let mut products: Vec<ProductSnapshot> =
        store.products.read().await.values().cloned().collect();
    if products.is_empty() {
        return (StatusCode::NOT_FOUND, "No products found").into_response();
    }
    products.sort_by_key(|p| p.id);
    Json(products).into_response()
}

async fn get_product(
    State(store): State<Arc<ProductStore>>,
    Path(id): Path<i64>,
) -> Response {
    match store.products.read().await.get(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Product not found").into_response(),
    }
}

async fn create_product(
    State(store): State<Arc<ProductStore>>,
    Json(new_product): Json<NewProduct>,
) -> Response {
    if new_product.name.is_empty() || new_product.price < 0.0 {
        return (StatusCode::BAD_REQUEST, "Invalid product details").into_response();
    }
    let id = store.next_id.fetch_add(1, Ordering::SeqCst);
    let product = ProductSnapshot {
        id,
        name: new_product.name,
        quantity: new_product.quantity,
        price: new_product.price,
    };
    store.products.write().await.insert(id, product.clone());
    tracing::info!(product_id = id, "product created");
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Build the product service router.
pub fn app(store: Arc<ProductStore>) -> Router {
    let guarded = Router::new()
        .route("/api/Products", get(list_products).post(create_product))
        .route("/api/Products/:id", get(get_product))
        .layer(middleware::from_fn(require_gateway))
        .with_state(store);

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
