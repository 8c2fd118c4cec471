// ============================================================================
// Peer Service Clients
// ============================================================================
//
// Typed callers for the product and user peer services. Peers are only
// reachable through the API gateway, so both clients are constructed
// with the gateway base address and share one pooled HTTP client.
//
// ============================================================================

mod product;
mod user;

pub use product::ProductClient;
pub use user::UserClient;

use std::time::Duration;

use crate::fault::FaultKind;

/// Outcome of a single peer fetch.
///
/// A non-success status is data, not an error: it carries which fault
/// class the peer produced, is never retried, and the caller decides how
/// to degrade. Only transport faults surface as `PeerError`.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerFetch<T> {
    Fetched(T),
    Unavailable(FaultKind),
}

impl<T> PeerFetch<T> {
    pub fn fetched(self) -> Option<T> {
        match self {
            PeerFetch::Fetched(value) => Some(value),
            PeerFetch::Unavailable(_) => None,
        }
    }
}

/// Pooled HTTP client shared by the peer callers.
///
/// `timeout` bounds each outbound call; a hit surfaces as a
/// transient-network fault and is what the retry pipeline acts on.
pub fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .tcp_keepalive(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("Failed to create HTTP client")
}
