// ============================================================================
// Bazaar Config - Centralized configuration management
// ============================================================================
//
// This crate provides centralized configuration for all Bazaar services.
// Supports loading from environment variables with sensible defaults.
//
// ============================================================================

mod retry;
mod upstream;

pub use retry::RetryConfig;
pub use upstream::UpstreamConfig;

use anyhow::Result;

/// Main configuration structure for Bazaar services
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the service binds to (e.g., "127.0.0.1:8000")
    pub bind_address: String,

    /// Log filter passed to the tracing subscriber
    pub rust_log: String,

    // Sub-configurations
    pub retry: RetryConfig,
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            retry: RetryConfig::from_env(),
            upstream: UpstreamConfig::from_env(),
        })
    }
}
