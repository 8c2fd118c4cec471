// ============================================================================
// API Gateway
// ============================================================================
//
// Single trusted entry point for all client traffic. Routes requests to
// internal services by path prefix, stamps the trust header and a
// request id, and proxies the response back unchanged.
//
// Internal services reject anything without the trust stamp, so this
// process is the only way in. The stamp is always overwritten here:
// a client-supplied value never survives the boundary.
//
// ============================================================================

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use bazaar_config::UpstreamConfig;
use bazaar_shared::middleware::GATEWAY_HEADER;

/// Value stamped into the trust header on every forwarded request.
const GATEWAY_STAMP: &str = "bazaar-gateway";
/// Trace id header propagated to internal services.
const HEADER_REQUEST_ID: &str = "x-request-id";

struct Route {
    prefix: &'static str,
    base_url: String,
    service: &'static str,
}

/// Gateway state: one pooled client plus the prefix routing table.
pub struct GatewayState {
    http: reqwest::Client,
    routes: Vec<Route>,
}

impl GatewayState {
    pub fn new(http: reqwest::Client, upstream: &UpstreamConfig) -> Self {
        Self {
            http,
            routes: vec![
                Route {
                    prefix: "/api/orders",
                    base_url: upstream.order_service_url.clone(),
                    service: "order",
                },
                Route {
                    prefix: "/api/Products",
                    base_url: upstream.product_service_url.clone(),
                    service: "product",
                },
                Route {
                    prefix: "/api/Authentication",
                    base_url: upstream.auth_service_url.clone(),
                    service: "auth",
                },
            ],
        }
    }

    fn target_for(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| path.starts_with(r.prefix))
    }
}

/// Forward one request to the service owning its path prefix.
async fn forward(
    State(state): State<Arc<GatewayState>>,
    request: Request,
) -> Result<Response, StatusCode> {
    let path = request.uri().path().to_string();
    let Some(route) = state.target_for(&path) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let target_url = match request.uri().query() {
        Some(query) => format!("{}{}?{}", route.base_url, path, query),
        None => format!("{}{}", route.base_url, path),
    };

    let method = request.method().clone();
    let headers = request.headers().clone();
    let request_id = Uuid::new_v4().to_string();

    let body_bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let mut outbound = state.http.request(method, &target_url);
    for (key, value) in headers.iter() {
        // host is set per-connection; the trust stamp and request id are
        // ALWAYS overwritten below to prevent injection
        if key == &header::HOST
            || key.as_str().eq_ignore_ascii_case(GATEWAY_HEADER)
            || key.as_str() == HEADER_REQUEST_ID
        {
            continue;
        }
        outbound = outbound.header(key, value);
    }
    outbound = outbound
        .header(GATEWAY_HEADER, GATEWAY_STAMP)
        .header(HEADER_REQUEST_ID, request_id.as_str());
    if !body_bytes.is_empty() {
        outbound = outbound.body(body_bytes.to_vec());
    }

    match outbound.send().await {
        Ok(response) => {
            let status = response.status();
            let mut builder = axum::http::Response::builder().status(status);
            for (key, value) in response.headers().iter() {
                builder = builder.header(key, value);
            }
            let bytes = response.bytes().await.map_err(|e| {
                tracing::error!(
                    service = route.service,
                    request_id = %request_id,
                    error = %e,
                    "Failed to read upstream response body"
                );
                StatusCode::BAD_GATEWAY
            })?;
            builder
                .body(Body::from(bytes))
                .map_err(|_| StatusCode::BAD_GATEWAY)
        }
        Err(e) => {
            tracing::error!(
                service = route.service,
                target_url = %target_url,
                request_id = %request_id,
                error = %e,
                "Failed to forward request to service"
            );
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Build the gateway router.
pub fn app(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(forward)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
