// ============================================================================
// Order Handlers
// ============================================================================

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use bazaar_shared::fault::ApiError;

use crate::repository::NewOrder;
use crate::service::DetailsOutcome;
use crate::OrderContext;

pub async fn list_orders(State(ctx): State<Arc<OrderContext>>) -> Response {
    let orders = ctx.repository.all().await;
    if orders.is_empty() {
        return (StatusCode::NOT_FOUND, "No orders found").into_response();
    }
    Json(orders).into_response()
}

pub async fn get_order(
    State(ctx): State<Arc<OrderContext>>,
    Path(id): Path<i64>,
) -> Response {
    match ctx.repository.find_by_id(id).await {
        Some(order) => Json(order).into_response(),
        None => (StatusCode::NOT_FOUND, "Order not found").into_response(),
    }
}

pub async fn create_order(
    State(ctx): State<Arc<OrderContext>>,
    Json(new_order): Json<NewOrder>,
) -> Response {
    if new_order.purchase_quantity <= 0 {
        return (StatusCode::BAD_REQUEST, "Invalid order details").into_response();
    }
    let order = ctx.repository.create(new_order).await;
    tracing::info!(order_id = order.id, client_id = order.client_id, "order created");
    (StatusCode::CREATED, Json(order)).into_response()
}

pub async fn update_order(
    State(ctx): State<Arc<OrderContext>>,
    Path(id): Path<i64>,
    Json(new_order): Json<NewOrder>,
) -> Response {
    if new_order.purchase_quantity <= 0 {
        return (StatusCode::BAD_REQUEST, "Invalid order details").into_response();
    }
    match ctx.repository.update(id, new_order).await {
        Some(order) => Json(order).into_response(),
        None => (StatusCode::NOT_FOUND, "Order not found").into_response(),
    }
}

pub async fn delete_order(
    State(ctx): State<Arc<OrderContext>>,
    Path(id): Path<i64>,
) -> Response {
    if ctx.repository.delete(id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Order not found").into_response()
    }
}

pub async fn get_client_orders(
    State(ctx): State<Arc<OrderContext>>,
    Path(client_id): Path<i64>,
) -> Response {
    if client_id <= 0 {
        return (StatusCode::BAD_REQUEST, "Invalid client id").into_response();
    }
    match ctx.aggregator.get_orders_by_client_id(client_id).await {
        Some(orders) => Json(orders).into_response(),
        None => (StatusCode::NOT_FOUND, "No orders found for client").into_response(),
    }
}

pub async fn get_order_details(
    State(ctx): State<Arc<OrderContext>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    if id <= 0 {
        return Ok((StatusCode::BAD_REQUEST, "Invalid order id").into_response());
    }
    match ctx.aggregator.get_order_details(id).await? {
        DetailsOutcome::Details(details) => Ok(Json(*details).into_response()),
        DetailsOutcome::OrderMissing => {
            Ok((StatusCode::NOT_FOUND, "Order details not found").into_response())
        }
        DetailsOutcome::PeerUnavailable { peer, kind } => {
            tracing::warn!(
                order_id = id,
                peer = %peer,
                fault = ?kind,
                "order details degraded: peer snapshot unavailable"
            );
            Ok((StatusCode::NOT_FOUND, "Order details not found").into_response())
        }
    }
}
