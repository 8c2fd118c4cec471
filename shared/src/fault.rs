// ============================================================================
// Fault Taxonomy & ApiError
// ============================================================================
//
// Upstream failures are classified into a closed tagged set so the retry
// predicate can be exhaustive and testable without matching on concrete
// transport error types.
//
// ============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::problem::ProblemPayload;

/// Closed classification of faults raised by peer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Cancellation or timeout while the call was in flight.
    TransientNetwork,
    /// Peer answered with a 4xx status.
    PeerClient,
    /// Peer answered with a 5xx status.
    PeerServer,
    /// Anything the taxonomy cannot place.
    Unknown,
}

impl FaultKind {
    /// Classify a non-success peer status.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_client_error() {
            FaultKind::PeerClient
        } else if status.is_server_error() {
            FaultKind::PeerServer
        } else {
            FaultKind::Unknown
        }
    }

    /// True only for the cancellation/timeout class. Peer non-success
    /// statuses are deliberately not transient: a 500 from a peer is
    /// never retried.
    pub fn is_transient(self) -> bool {
        matches!(self, FaultKind::TransientNetwork)
    }
}

/// Failure of a single peer call, tagged for the retry predicate.
#[derive(Debug, Clone, Error)]
#[error("{service} call failed ({kind:?}): {message}")]
pub struct PeerError {
    service: &'static str,
    kind: FaultKind,
    message: String,
}

impl PeerError {
    pub fn new(service: &'static str, kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            service,
            kind,
            message: message.into(),
        }
    }

    /// Classify a transport-level error from the HTTP client.
    pub fn from_transport(service: &'static str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FaultKind::TransientNetwork
        } else {
            FaultKind::Unknown
        };
        Self::new(service, kind, err.to_string())
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }
}

/// Application error surfaced at the request boundary.
///
/// Handlers return this for fault paths only; expected misses (404) and
/// validation rejects (400) are plain responses. Rendering always goes
/// through the problem payload, so no internal detail reaches a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A cancellation/timeout-class fault that survived the retry policy.
    #[error("upstream call timed out: {0}")]
    Timeout(#[source] PeerError),

    /// A peer call that failed outside the timeout class.
    #[error("upstream call failed: {0}")]
    Upstream(#[source] PeerError),

    /// Anything else that escaped a handler.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PeerError> for ApiError {
    fn from(err: PeerError) -> Self {
        match err.kind() {
            FaultKind::TransientNetwork => ApiError::Timeout(err),
            _ => ApiError::Upstream(err),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn payload(&self) -> ProblemPayload {
        match self {
            ApiError::Timeout(_) => ProblemPayload::timeout(),
            ApiError::Upstream(_) | ApiError::Internal(_) => ProblemPayload::server_error(),
        }
    }

    /// Record the original fault server-side. Best-effort: must never
    /// itself fail the request.
    pub fn log(&self) {
        match self {
            ApiError::Timeout(source) => {
                tracing::warn!(
                    error = %self,
                    service = source.service(),
                    "request timed out against upstream"
                );
            }
            ApiError::Upstream(source) => {
                tracing::error!(
                    error = %self,
                    service = source.service(),
                    fault = ?source.kind(),
                    "upstream call failed"
                );
            }
            ApiError::Internal(_) => {
                tracing::error!(error = %self, "unhandled server error");
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Original fault is logged before the client ever sees a shape.
        self.log();
        self.payload().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_is_exhaustive_over_classes() {
        assert_eq!(
            FaultKind::from_status(StatusCode::NOT_FOUND),
            FaultKind::PeerClient
        );
        assert_eq!(
            FaultKind::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            FaultKind::PeerServer
        );
        assert_eq!(
            FaultKind::from_status(StatusCode::PERMANENT_REDIRECT),
            FaultKind::Unknown
        );
    }

    #[test]
    fn only_the_timeout_class_is_transient() {
        assert!(FaultKind::TransientNetwork.is_transient());
        assert!(!FaultKind::PeerClient.is_transient());
        assert!(!FaultKind::PeerServer.is_transient());
        assert!(!FaultKind::Unknown.is_transient());
    }

    #[test]
    fn timeout_faults_render_as_408() {
        let err = ApiError::from(PeerError::new(
            "product",
            FaultKind::TransientNetwork,
            "deadline elapsed",
        ));
        assert_eq!(err.status_code(), StatusCode::REQUEST_TIMEOUT);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn non_timeout_faults_render_as_500() {
        let err = ApiError::from(PeerError::new(
            "user",
            FaultKind::Unknown,
            "connection reset",
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
