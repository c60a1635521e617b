//! Cache-aside weather lookup service.
//!
//! [`WeatherService`] is the only component that knows about both the cache
//! and the upstream provider:
//!
//! - a cache hit is returned as-is (expiry is the repository's job);
//! - a miss goes to the provider, and a successful result is written back
//!   with [`CITY_WEATHER_TTL`] before being returned.
//!
//! # Batch lookups
//!
//! `get_many` reads every requested city in one batched cache call, then
//! fetches all misses concurrently and waits for every fetch to finish.
//! If any fetch fails the whole call fails with the first error (in request
//! order); writes already made by successful siblings stay in the cache.
//!
//! There is no single-flight: concurrent misses for the same city each go
//! upstream and each write the cache (last write wins). Errors are passed
//! through untouched; classification happens in the provider.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::debug;

use crate::cache::{CITY_WEATHER_TTL, WeatherCacheRepository};
use crate::providers::WeatherProvider;
use crate::traits::WeatherLookup;
use crate::types::{Weather, WeatherByCities, WeatherByCity, normalize_city};
use crate::{Result, telemetry};

/// Cache-aside orchestrator over a cache repository and a provider.
///
/// Both dependencies are long-lived shared handles created at process
/// start; the service never opens or closes them.
pub struct WeatherService {
    cache: Arc<dyn WeatherCacheRepository>,
    provider: Arc<dyn WeatherProvider>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(cache: Arc<dyn WeatherCacheRepository>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            cache,
            provider,
            ttl: CITY_WEATHER_TTL,
        }
    }

    /// Override the TTL used when writing fetched values.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// TTL used when writing fetched values.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn fetch_and_cache(&self, city: &str) -> Result<Weather> {
        let weather = self.provider.get(&WeatherByCity::new(city)).await?;
        self.cache.put(&weather, self.ttl).await?;
        debug!(
            city,
            provider = self.provider.name(),
            ttl_secs = self.ttl.as_secs(),
            "cached fresh weather"
        );
        Ok(weather)
    }
}

#[async_trait]
impl WeatherLookup for WeatherService {
    async fn get_one(&self, query: &WeatherByCity) -> Result<Weather> {
        if let Some(weather) = self.cache.get_one(query).await? {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "get_one").increment(1);
            return Ok(weather);
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "get_one").increment(1);
        self.fetch_and_cache(&query.city).await
    }

    async fn get_many(&self, query: &WeatherByCities) -> Result<Vec<Weather>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        // Case variants of one city collapse to its first spelling.
        let mut seen = HashSet::new();
        let requested =
            WeatherByCities::new(query.cities.iter().filter(|c| seen.insert(normalize_city(c))));

        let cached = self.cache.get_many(&requested).await?;
        let cached_cities: HashSet<String> =
            cached.iter().map(|w| normalize_city(&w.city)).collect();
        let missing: Vec<&str> = requested
            .cities
            .iter()
            .filter(|c| !cached_cities.contains(&normalize_city(c)))
            .map(String::as_str)
            .collect();

        metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => "get_many")
            .increment(cached.len() as u64);
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => "get_many")
            .increment(missing.len() as u64);

        if missing.is_empty() {
            return Ok(cached);
        }

        debug!(
            hits = cached.len(),
            misses = missing.len(),
            "fetching missing cities"
        );
        let fetched = join_all(missing.iter().map(|city| self.fetch_and_cache(city)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let mut weathers = cached;
        weathers.extend(fetched);
        Ok(weathers)
    }
}
