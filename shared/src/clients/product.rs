//! Client for the product peer service.

use crate::clients::PeerFetch;
use crate::fault::{FaultKind, PeerError};
use crate::models::ProductSnapshot;

const SERVICE: &str = "product";

/// Typed caller for `GET /api/Products/{id}`, routed through the gateway.
#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProductClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch one product snapshot. Non-success statuses collapse to
    /// `Unavailable` with the peer's fault class; transport faults
    /// surface as `PeerError` for the retry pipeline.
    pub async fn get_product(&self, id: i64) -> Result<PeerFetch<ProductSnapshot>, PeerError> {
        let url = format!("{}/api/Products/{}", self.base_url, id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PeerError::from_transport(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(service = SERVICE, id, status = %status, "peer returned non-success");
            return Ok(PeerFetch::Unavailable(FaultKind::from_status(status)));
        }

        let snapshot = response
            .json::<ProductSnapshot>()
            .await
            .map_err(|e| PeerError::from_transport(SERVICE, e))?;
        Ok(PeerFetch::Fetched(snapshot))
    }
}
