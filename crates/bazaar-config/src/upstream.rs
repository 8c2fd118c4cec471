// ============================================================================
// Upstream Configuration
// ============================================================================

/// Addresses of the services this process talks to.
///
/// Internal services never call each other directly: the order service
/// reaches its peers through the gateway base address, and the gateway
/// fans out to the per-service URLs.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// API Gateway base address (e.g., "http://localhost:8000")
    pub gateway_base_url: String,
    /// Order Service URL (e.g., "http://order-service:8001")
    pub order_service_url: String,
    /// Product Service URL (e.g., "http://product-service:8002")
    pub product_service_url: String,
    /// Auth Service URL (e.g., "http://auth-service:8003")
    pub auth_service_url: String,
    /// Timeout for outbound service requests in seconds (default: 5)
    pub service_timeout_secs: u64,
}

impl UpstreamConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            gateway_base_url: std::env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            order_service_url: std::env::var("ORDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            product_service_url: std::env::var("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8002".to_string()),
            auth_service_url: std::env::var("AUTH_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8003".to_string()),
            service_timeout_secs: std::env::var("SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}
