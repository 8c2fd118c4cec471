// ============================================================================
// Retry Pipelines
// ============================================================================
//
// Named, reusable retry policies for peer service calls. A policy retries
// an async operation while its predicate accepts the fault kind and
// attempts remain; every other fault propagates unchanged on the first
// occurrence. Policies live in a registry built once at startup and
// handed to consumers at construction time.
//
// ============================================================================

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use crate::fault::{FaultKind, PeerError};
use bazaar_config::RetryConfig;

/// Name of the pipeline the aggregation orchestrator resolves.
pub const DEFAULT_PIPELINE: &str = "my-retry-pipeline";

/// Backoff shape between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    /// Same delay before every retry.
    Constant,
    /// Delay doubles with each retry: base * 2^(attempt - 1).
    Exponential,
}

/// Diagnostic hook invoked before each retry wait. Must not panic and
/// must not block materially.
pub type OnRetry = Arc<dyn Fn(u32, FaultKind) + Send + Sync>;

/// A single named retry policy.
pub struct RetryPolicy {
    name: String,
    max_attempts: u32,
    base_delay: Duration,
    backoff: BackoffKind,
    jitter: bool,
    retryable: fn(FaultKind) -> bool,
    on_retry: Option<OnRetry>,
}

impl RetryPolicy {
    /// New constant-backoff policy retrying only transient-network faults.
    pub fn new(name: impl Into<String>, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            name: name.into(),
            // a policy always runs the operation at least once
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff: BackoffKind::Constant,
            jitter: false,
            retryable: FaultKind::is_transient,
            on_retry: None,
        }
    }

    pub fn backoff(mut self, kind: BackoffKind) -> Self {
        self.backoff = kind;
        self
    }

    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    pub fn retry_when(mut self, predicate: fn(FaultKind) -> bool) -> Self {
        self.retryable = predicate;
        self
    }

    pub fn on_retry(mut self, hook: impl Fn(u32, FaultKind) + Send + Sync + 'static) -> Self {
        self.on_retry = Some(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delay before the retry following `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = match self.backoff {
            BackoffKind::Constant => self.base_delay,
            BackoffKind::Exponential => self.base_delay * 2u32.saturating_pow(attempt - 1),
        };
        if self.jitter { jittered(base) } else { base }
    }

    /// Run `operation` under this policy. The fault from the last attempt
    /// propagates unchanged once the predicate rejects it or attempts are
    /// exhausted.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, PeerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PeerError>>,
    {
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(
                            pipeline = %self.name,
                            attempt,
                            "operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(err) => {
                    let kind = err.kind();
                    if !(self.retryable)(kind) || attempt >= self.max_attempts {
                        return Err(err);
                    }
                    if let Some(hook) = &self.on_retry {
                        hook(attempt, kind);
                    }
                    warn!(
                        pipeline = %self.name,
                        attempt,
                        max_attempts = self.max_attempts,
                        fault = ?kind,
                        error = %err,
                        "operation failed, will retry"
                    );
                    tokio::time::sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Uniform draw from [0.5, 1.5) x base so concurrent callers do not
/// retry in lockstep. Never negative.
fn jittered(base: Duration) -> Duration {
    let factor: f64 = rand::thread_rng().gen_range(0.5..1.5);
    base.mul_f64(factor)
}

/// Immutable name -> policy map, built once at startup and passed to
/// consumers at construction time.
#[derive(Default)]
pub struct RetryRegistry {
    policies: HashMap<String, Arc<RetryPolicy>>,
}

impl RetryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, policy: RetryPolicy) -> Self {
        self.policies
            .insert(policy.name.clone(), Arc::new(policy));
        self
    }

    /// Resolve a pipeline by name. Consumers treat `None` as a startup
    /// error, never as a per-call fallback.
    pub fn get(&self, name: &str) -> Option<Arc<RetryPolicy>> {
        self.policies.get(name).cloned()
    }

    /// Registry holding the default peer-call pipeline.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new().register(
            RetryPolicy::new(
                DEFAULT_PIPELINE,
                config.max_attempts,
                Duration::from_millis(config.base_delay_ms),
            )
            .backoff(BackoffKind::Constant)
            .jitter(config.jitter),
        )
    }
}
