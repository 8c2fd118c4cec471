// ============================================================================
// Gateway Forwarding Tests
// ============================================================================
//
// The gateway must stamp the trust header (overwriting any client
// value), attach a request id, route by prefix, and mirror upstream
// responses.
//
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use bazaar_config::UpstreamConfig;
use gateway::{app, GatewayState};

async fn echo_headers(request: Request) -> Json<serde_json::Value> {
    let stamp = request
        .headers()
        .get("Api-Gateway")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let has_request_id = request.headers().contains_key("x-request-id");
    Json(json!({"stamp": stamp, "hasRequestId": has_request_id}))
}

async fn echo_body(body: Bytes) -> Bytes {
    body
}

async fn bind_ephemeral() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    (listener, address)
}

/// Spawn a downstream order service stand-in and a gateway routing all
/// three prefixes at it (except product, which can be overridden).
async fn spawn_gateway(product_url_override: Option<String>) -> String {
    let downstream = Router::new()
        .route("/api/orders/headers", get(echo_headers))
        .route("/api/orders/body", post(echo_body));
    let (listener, downstream_base) = bind_ephemeral().await;
    tokio::spawn(async move {
        axum::serve(listener, downstream)
            .await
            .expect("downstream stand-in failed");
    });

    let upstream = UpstreamConfig {
        gateway_base_url: String::new(),
        order_service_url: downstream_base.clone(),
        product_service_url: product_url_override.unwrap_or_else(|| downstream_base.clone()),
        auth_service_url: downstream_base,
        service_timeout_secs: 2,
    };
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let state = Arc::new(GatewayState::new(http, &upstream));

    let (listener, gateway_base) = bind_ephemeral().await;
    tokio::spawn(async move {
        axum::serve(listener, app(state))
            .await
            .expect("gateway failed");
    });
    gateway_base
}

#[tokio::test]
async fn trust_stamp_is_injected_and_spoofing_is_overwritten() {
    let gateway = spawn_gateway(None).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/orders/headers", gateway))
        .header("Api-Gateway", "spoofed-by-client")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let seen: serde_json::Value = response.json().await.unwrap();
    assert_eq!(seen["stamp"], "bazaar-gateway");
    assert_eq!(seen["hasRequestId"], true);
}

#[tokio::test]
async fn unknown_prefixes_are_not_forwarded() {
    let gateway = spawn_gateway(None).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/unknown/thing", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_service_yields_502() {
    let (listener, dead_base) = bind_ephemeral().await;
    drop(listener);

    let gateway = spawn_gateway(Some(dead_base)).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/Products/1", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn bodies_and_statuses_are_mirrored() {
    let gateway = spawn_gateway(None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/orders/body", gateway))
        .body("round and round")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "round and round");

    // a downstream 404 passes back through unchanged
    let response = client
        .get(format!("{}/api/orders/nowhere", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
