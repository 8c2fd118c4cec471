// ============================================================================
// Problem Payload
// ============================================================================
//
// The one error shape clients ever see. Every flagged status code and
// every intercepted fault is rendered as this JSON body.
//
// ============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Uniform error body returned for any flagged or failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemPayload {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemPayload {
    pub fn new(title: impl Into<String>, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    /// 429 body written over throttled responses.
    pub fn throttled() -> Self {
        Self::new(
            "Warning",
            StatusCode::TOO_MANY_REQUESTS,
            "Too many request, kindly try again later",
        )
    }

    /// 401 body written over unauthorized responses.
    pub fn unauthorized() -> Self {
        Self::new(
            "Alert",
            StatusCode::UNAUTHORIZED,
            "Sorry, you are not authorized to access this resource",
        )
    }

    /// 403 body written over forbidden responses.
    pub fn forbidden() -> Self {
        Self::new(
            "Out of Access",
            StatusCode::FORBIDDEN,
            "Sorry, you are forbidden to access this resource",
        )
    }

    /// 408 body for cancellation/timeout-class faults.
    pub fn timeout() -> Self {
        Self::new(
            "Timeout",
            StatusCode::REQUEST_TIMEOUT,
            "Sorry, request timeout. Kindly try again",
        )
    }

    /// 500 body for any fault the taxonomy cannot place.
    pub fn server_error() -> Self {
        Self::new(
            "Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Sorry,internal server error occured. Kindly try again",
        )
    }
}

impl IntoResponse for ProblemPayload {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
