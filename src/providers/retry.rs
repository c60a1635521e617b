//! Retry configuration, delay calculation, and the retry loop.
//!
//! Provides [`RetryConfig`] (the backoff schedule) and [`with_retry()`], an
//! explicit loop that takes a retryability predicate alongside the schedule.
//! Keeping both as parameters lets callers (and tests) inspect and swap the
//! policy without touching the request code.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::telemetry;

/// Backoff schedule for retrying transient errors.
///
/// Uses exponential backoff with optional additive jitter:
///
/// ```rust
/// # use vedrfolnir::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(3)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(false);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 5.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries, jitter included. Default: 10s.
    pub max_delay: Duration,
    /// Whether to add random jitter to delays. Default: true.
    pub jitter: bool,
    /// Upper bound of the uniform jitter added to each delay. Default: 1s.
    pub max_jitter: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
            max_jitter: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Create a new config with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter.
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Set the upper bound of the added jitter.
    pub fn max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `initial_delay * 2^attempt`, capped at `max_delay`.
    /// Does NOT include jitter; see [`effective_delay()`](Self::effective_delay)
    /// for the full calculation.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the delay to sleep before retrying after `attempt`.
    ///
    /// Adds uniform jitter in `[0, max_jitter)` when enabled; the result is
    /// still capped at `max_delay`.
    pub fn effective_delay(&self, attempt: u32) -> Duration {
        let base = self.delay_for_attempt(attempt);
        if !self.jitter || self.max_jitter.is_zero() {
            return base;
        }
        let jitter = rand::thread_rng().gen_range(Duration::ZERO..self.max_jitter);
        base.saturating_add(jitter).min(self.max_delay)
    }
}

/// Why a retried operation gave up.
#[derive(Debug)]
pub enum RetryFailure<E> {
    /// The predicate classified the error as not retryable. Returned after
    /// the first such error, without sleeping.
    Fatal(E),
    /// Every attempt failed with a retryable error.
    Exhausted {
        /// Number of attempts made (equal to `max_attempts`).
        attempts: u32,
        /// Error from the final attempt.
        last: E,
    },
}

impl<E> RetryFailure<E> {
    /// Underlying error, regardless of how the loop ended.
    pub fn into_inner(self) -> E {
        match self {
            RetryFailure::Fatal(e) => e,
            RetryFailure::Exhausted { last, .. } => last,
        }
    }
}

/// Execute an async operation with retry logic.
///
/// Calls `f` with the 1-based attempt number. Errors for which
/// `is_retryable` returns `true` are retried up to `config.max_attempts`
/// total attempts, sleeping [`RetryConfig::effective_delay`] in between.
/// Any other error ends the loop immediately. No sleep happens after a
/// success, a fatal error, or the last attempt.
pub async fn with_retry<F, Fut, T, E, P>(
    config: &RetryConfig,
    operation: &str,
    is_retryable: P,
    mut f: F,
) -> std::result::Result<T, RetryFailure<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match f(attempt).await {
            Ok(result) => return Ok(result),
            Err(e) if !is_retryable(&e) => return Err(RetryFailure::Fatal(e)),
            Err(e) if attempt >= max_attempts => {
                return Err(RetryFailure::Exhausted {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                metrics::counter!(telemetry::RETRIES_TOTAL, "operation" => operation.to_owned())
                    .increment(1);
                let delay = config.effective_delay(attempt - 1);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
