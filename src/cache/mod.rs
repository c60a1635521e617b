//! Weather cache repositories.
//!
//! [`WeatherCacheRepository`] is the contract the lookup service reads
//! through: per-key TTL on write, single-key reads, and batched multi-key
//! reads. Two backends implement it:
//!
//! - [`MemoryWeatherCache`]: in-process moka cache with per-entry expiry.
//!   Suitable for a single instance and for tests.
//!
//! - [`RedisWeatherCache`] (feature `redis`): shared key/value store using
//!   `SET key value EX ttl`, `GET`, and a pipelined multi-`GET`.
//!
//! Keys are normalized with [`city_key`](crate::types::city_key), so two
//! cities differing only in case share an entry. Writes are unconditional
//! overwrites (last writer wins). Store failures are not retried here;
//! they surface as [`VedrfolnirError::Cache`](crate::VedrfolnirError::Cache).

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::{CacheConfig, MemoryWeatherCache};
#[cfg(feature = "redis")]
pub use self::redis::RedisWeatherCache;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;
use crate::types::{Weather, WeatherByCities, WeatherByCity};

/// TTL applied to every weather value written by the lookup service.
pub const CITY_WEATHER_TTL: Duration = Duration::from_secs(600);

/// Storage contract for cached weather.
#[async_trait]
pub trait WeatherCacheRepository: Send + Sync {
    /// Store `weather` under its normalized city key, expiring after `ttl`.
    /// Overwrites any existing entry.
    async fn put(&self, weather: &Weather, ttl: Duration) -> Result<()>;

    /// Fetch one city. Expired entries are reported as absent.
    async fn get_one(&self, query: &WeatherByCity) -> Result<Option<Weather>>;

    /// Fetch many cities in one batched round trip.
    ///
    /// Cities without a live entry are silently omitted. The output order
    /// is not guaranteed to follow the input.
    async fn get_many(&self, query: &WeatherByCities) -> Result<Vec<Weather>>;

    /// Remove a city's entry, if any.
    async fn delete(&self, city: &str) -> Result<()>;
}

/// Serialize a weather value for byte/string stores.
pub(crate) fn encode(weather: &Weather) -> Result<String> {
    Ok(serde_json::to_string(weather)?)
}

/// Inverse of [`encode`].
pub(crate) fn decode(value: &str) -> Result<Weather> {
    Ok(serde_json::from_str(value)?)
}
