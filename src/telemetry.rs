//! Telemetry metric name constants.
//!
//! Centralised metric names for vedrfolnir operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `vedrfolnir_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: upstream provider name (e.g. "openweather")
//! - `operation`: lookup invoked ("get_one" | "get_many"), or the retried
//!   operation name for retries
//! - `status`: upstream HTTP status code, or "error" for transport failures

/// Total HTTP attempts sent upstream (each retry counts).
///
/// Labels: `provider`, `status`.
pub const UPSTREAM_REQUESTS_TOTAL: &str = "vedrfolnir_upstream_requests_total";

/// Upstream attempt duration in seconds.
///
/// Labels: `provider`.
pub const UPSTREAM_DURATION_SECONDS: &str = "vedrfolnir_upstream_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "vedrfolnir_retries_total";

/// Total cities served from cache.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "vedrfolnir_cache_hits_total";

/// Total cities that missed the cache.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "vedrfolnir_cache_misses_total";
