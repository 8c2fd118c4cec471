// ============================================================================
// Bazaar Shared Library
// ============================================================================
//
// Machinery shared by every Bazaar service:
// - fault: closed fault taxonomy and the uniform ApiError type
// - problem: the problem payload written to clients for flagged requests
// - middleware: gateway trust boundary + fault translation layers
// - retry: named retry pipelines with backoff and jitter
// - clients: typed callers for the product and user peer services
// - models: wire DTOs exchanged between services
//
// ============================================================================

pub mod clients;
pub mod fault;
pub mod middleware;
pub mod models;
pub mod problem;
pub mod retry;

pub use fault::{ApiError, FaultKind, PeerError};
pub use problem::ProblemPayload;

use tracing::info;

/// Wait for SIGINT or SIGTERM so services can drain in-flight requests
/// before the process exits.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, initiating graceful shutdown...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("SIGINT received, initiating graceful shutdown...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
        info!("Ctrl-C received, initiating graceful shutdown...");
    }
}
