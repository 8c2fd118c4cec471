//! Client for the authentication/user peer service.

use crate::clients::PeerFetch;
use crate::fault::{FaultKind, PeerError};
use crate::models::UserSnapshot;

const SERVICE: &str = "user";

/// Typed caller for `GET /api/Authentication/getUser/{id}`, routed
/// through the gateway.
#[derive(Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
}

impl UserClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch one user snapshot. Same outcome mapping as the product
    /// client: statuses are data, transport faults are errors.
    pub async fn get_user(&self, id: i64) -> Result<PeerFetch<UserSnapshot>, PeerError> {
        let url = format!("{}/api/Authentication/getUser/{}", self.base_url, id);
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
            .json::<UserSnapshot>()
            .await
            .map_err(|e| PeerError::from_transport(SERVICE, e))?;
        Ok(PeerFetch::Fetched(snapshot))
    }
}
