// ============================================================================
// Retry Configuration
// ============================================================================

/// Settings for the default retry pipeline used for peer service calls
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of attempts per peer call, including the first (default: 3)
    pub max_attempts: u32,
    /// Base delay between attempts in milliseconds (default: 500)
    pub base_delay_ms: u64,
    /// Whether the delay is jittered to spread concurrent retries (default: true)
    pub jitter: bool,
}

impl RetryConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            max_attempts: std::env::var("RETRY_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),
            jitter: std::env::var("RETRY_JITTER")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }
}
