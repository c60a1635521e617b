//! Redis-backed weather cache.
//!
//! Values are JSON under `weather:city:{city}` keys, written with
//! `SET key value EX ttl` so expiry is managed by the store. Batch reads go
//! out as one pipeline of `GET`s.
//!
//! The connection is a [`ConnectionManager`]: created once at process start,
//! cloned per call (clones share one multiplexed connection), and closed by
//! dropping the last handle. Connection failures are not retried here.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use super::{WeatherCacheRepository, decode, encode};
use crate::Result;
use crate::types::{Weather, WeatherByCities, WeatherByCity, city_key};

/// [`WeatherCacheRepository`] backed by Redis.
#[derive(Clone)]
pub struct RedisWeatherCache {
    conn: ConnectionManager,
}

impl RedisWeatherCache {
    /// Connect to `url` (e.g. `redis://:password@host:6379`) and verify the
    /// connection with `PING`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let addr = client.get_connection_info().addr.to_string();
        let conn = ConnectionManager::new(client).await?;
        let cache = Self::from_connection(conn);
        cache.ping().await?;
        info!(%addr, "redis connected");
        Ok(cache)
    }

    /// Wrap an already established connection.
    pub fn from_connection(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Round-trip a `PING` to the store.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// `EX` takes whole seconds and rejects zero; round up.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl WeatherCacheRepository for RedisWeatherCache {
    async fn put(&self, weather: &Weather, ttl: Duration) -> Result<()> {
        let value = encode(weather)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(weather.cache_key(), value, ttl_seconds(ttl))
            .await?;
        Ok(())
    }

    async fn get_one(&self, query: &WeatherByCity) -> Result<Option<Weather>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(city_key(&query.city)).await?;
        value.as_deref().map(decode).transpose()
    }

    async fn get_many(&self, query: &WeatherByCities) -> Result<Vec<Weather>> {
        if query.cities.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for city in &query.cities {
            pipe.get(city_key(city));
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = pipe.query_async(&mut conn).await?;

        values.iter().flatten().map(|value| decode(value)).collect()
    }

    async fn delete(&self, city: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(city_key(city)).await?;
        Ok(())
    }
}
