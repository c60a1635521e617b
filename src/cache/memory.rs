//! In-process weather cache.
//!
//! Uses moka's async cache with a per-entry [`Expiry`], so every `put`
//! carries its own TTL the way a `SET ... EX` would. moka never returns an
//! entry past its expiry, even before the background eviction runs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use super::WeatherCacheRepository;
use crate::Result;
use crate::types::{Weather, WeatherByCities, WeatherByCity, city_key};

/// Configuration for [`MemoryWeatherCache`].
///
/// ```rust
/// # use vedrfolnir::cache::CacheConfig;
/// let config = CacheConfig::new().max_entries(50_000);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached cities. Default: 10,000.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }
}

#[derive(Clone, Debug)]
struct CachedWeather {
    weather: Weather,
    ttl: Duration,
}

/// Expiry driven by the TTL stored alongside each value. An overwrite
/// restarts the clock with the new TTL.
struct PerEntryTtl;

impl Expiry<String, CachedWeather> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedWeather,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedWeather,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// [`WeatherCacheRepository`] backed by an in-memory moka cache.
pub struct MemoryWeatherCache {
    entries: Cache<String, CachedWeather>,
}

impl MemoryWeatherCache {
    /// Create an empty cache with the default capacity.
    pub fn new() -> Self {
        Self::with_config(&CacheConfig::default())
    }

    /// Create an empty cache with the given configuration.
    pub fn with_config(config: &CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Approximate number of stored entries, expired ones included until
    /// moka runs its maintenance.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for MemoryWeatherCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherCacheRepository for MemoryWeatherCache {
    async fn put(&self, weather: &Weather, ttl: Duration) -> Result<()> {
        self.entries
            .insert(
                weather.cache_key(),
                CachedWeather {
                    weather: weather.clone(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn get_one(&self, query: &WeatherByCity) -> Result<Option<Weather>> {
        Ok(self
            .entries
            .get(&city_key(&query.city))
            .await
            .map(|cached| cached.weather))
    }

    async fn get_many(&self, query: &WeatherByCities) -> Result<Vec<Weather>> {
        let mut found = Vec::with_capacity(query.cities.len());
        for city in &query.cities {
            if let Some(cached) = self.entries.get(&city_key(city)).await {
                found.push(cached.weather);
            }
        }
        Ok(found)
    }

    async fn delete(&self, city: &str) -> Result<()> {
        self.entries.invalidate(&city_key(city)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Condition;

    fn weather(city: &str) -> Weather {
        Weather::new(city).with_condition(Condition::new("Clear", "clear sky"))
    }

    #[tokio::test]
    async fn put_then_get_one() {
        let cache = MemoryWeatherCache::new();
        cache
            .put(&weather("Seoul"), Duration::from_secs(600))
            .await
            .unwrap();

        let got = cache.get_one(&WeatherByCity::new("Seoul")).await.unwrap();
        assert_eq!(got, Some(weather("Seoul")));
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let cache = MemoryWeatherCache::new();
        cache
            .put(&weather("Seoul"), Duration::from_secs(600))
            .await
            .unwrap();

        let got = cache.get_one(&WeatherByCity::new("sEOUL")).await.unwrap();
        assert_eq!(got.map(|w| w.city), Some("Seoul".to_string()));
    }

    #[tokio::test]
    async fn zero_ttl_is_never_served() {
        let cache = MemoryWeatherCache::new();
        cache.put(&weather("Oslo"), Duration::ZERO).await.unwrap();
        assert!(cache.get_one(&WeatherByCity::new("Oslo")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache = MemoryWeatherCache::new();
        cache
            .put(&weather("Lima"), Duration::from_secs(600))
            .await
            .unwrap();
        cache.delete("LIMA").await.unwrap();
        assert!(cache.get_one(&WeatherByCity::new("Lima")).await.unwrap().is_none());
    }
}
