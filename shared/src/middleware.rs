// ============================================================================
// Service Middleware
// ============================================================================
//
// Two layers every internal service mounts:
// - require_gateway: trust-boundary check, rejects requests that did not
//   come through the API gateway
// - translate_status: rewrites flagged status codes (429/401/403) into
//   the uniform problem payload
//
// Handler panics are caught by tower-http's CatchPanicLayer with
// `handle_panic` below, so no raw backtrace ever reaches a client.
//
// ============================================================================

use std::any::Any;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http_body_util::Full;

use crate::problem::ProblemPayload;

/// Header stamped by the trusted ingress on every forwarded request.
/// Internal services only check for its presence; the trust model is
/// network topology, not cryptography.
pub const GATEWAY_HEADER: &str = "Api-Gateway";

/// Fixed plaintext body for requests that bypassed the gateway.
pub const GATEWAY_REJECT_BODY: &str = "Sorry, service is unvaliable";

/// Reject any request not marked as coming from the API gateway.
///
/// The downstream handler is never invoked for a rejected request. This
/// assumes the header is stripped or overwritten for anything that
/// originated outside the trusted ingress.
pub async fn require_gateway(request: Request, next: Next) -> Response {
    if request.headers().get(GATEWAY_HEADER).is_none() {
        tracing::warn!(
            path = %request.uri().path(),
            "rejecting request that did not come through the api gateway"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, GATEWAY_REJECT_BODY).into_response();
    }
    next.run(request).await
}

/// Rewrite flagged downstream statuses into the uniform problem payload.
///
/// The status code is preserved; only the body (and content type) change.
/// Everything else passes through untouched.
pub async fn translate_status(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let payload = match response.status() {
        StatusCode::TOO_MANY_REQUESTS => ProblemPayload::throttled(),
        StatusCode::UNAUTHORIZED => ProblemPayload::unauthorized(),
        StatusCode::FORBIDDEN => ProblemPayload::forbidden(),
        _ => return response,
    };
    payload.into_response()
}

/// Render a caught handler panic as the generic 500 problem payload.
/// Wire with `CatchPanicLayer::custom(handle_panic)`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::http::Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    let body = serde_json::to_vec(&ProblemPayload::server_error())
        .unwrap_or_else(|_| b"{\"title\":\"Error\",\"status\":500,\"detail\":\"\"}".to_vec());

    let mut response = axum::http::Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
