//! Vedrfolnir - cache-aside current-weather lookups
//!
//! This crate answers "current weather for city X (or a batch of cities)"
//! by consulting a TTL cache before falling back to a rate-limited,
//! failure-prone upstream provider. The pieces:
//!
//! - [`WeatherService`]: cache-aside orchestration, with concurrent
//!   fan-out for batch misses.
//! - [`cache::WeatherCacheRepository`]: per-key TTL storage with batched
//!   reads ([`MemoryWeatherCache`], and `RedisWeatherCache` behind the
//!   `redis` feature).
//! - [`OpenWeatherClient`]: resilient upstream client that classifies
//!   failures and retries transient ones with exponential backoff.
//! - [`OpenWeatherProvider`]: maps a city query to the upstream endpoint
//!   and the response to [`Weather`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vedrfolnir::{
//!     MemoryWeatherCache, OpenWeatherClient, OpenWeatherProvider, WeatherByCities,
//!     WeatherLookup, WeatherService,
//! };
//!
//! #[tokio::main]
//! async fn main() -> vedrfolnir::Result<()> {
//!     let client = Arc::new(OpenWeatherClient::new(
//!         "your-api-key",
//!         "https://api.openweathermap.org",
//!     )?);
//!     let service = WeatherService::new(
//!         Arc::new(MemoryWeatherCache::new()),
//!         Arc::new(OpenWeatherProvider::new(client)),
//!     );
//!
//!     let weathers = service
//!         .get_many(&WeatherByCities::new(["Seoul", "Tokyo", "London"]))
//!         .await?;
//!     for weather in weathers {
//!         println!("{}: {:?}", weather.city, weather.conditions);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod providers;
pub mod response;
pub mod service;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use cache::{CITY_WEATHER_TTL, MemoryWeatherCache, WeatherCacheRepository};
pub use error::{Result, VedrfolnirError};
pub use providers::{
    OpenWeatherClient, OpenWeatherProvider, RetryConfig, RetryFailure, WeatherProvider, with_retry,
};
pub use response::{ErrorReport, ServerResponse};
pub use service::WeatherService;
pub use traits::WeatherLookup;

#[cfg(feature = "redis")]
pub use cache::RedisWeatherCache;

// Re-export all types
pub use types::{Condition, Weather, WeatherByCities, WeatherByCity};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
