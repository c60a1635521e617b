//! Provider trait for the upstream source of truth.
//!
//! The lookup service only depends on this trait, so any weather source
//! (or a test fake) can stand in for the OpenWeather adapter.
//!
//! # Example
//!
//! ```ignore
//! struct Fixed;
//!
//! #[async_trait]
//! impl WeatherProvider for Fixed {
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//!
//!     async fn get(&self, query: &WeatherByCity) -> Result<Weather> {
//!         Ok(Weather::new(&query.city))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::types::{Weather, WeatherByCity};

/// Provider of current weather, keyed by city name.
///
/// Errors are already classified by the time they reach the caller:
/// domain errors (`BadRequest`, `Unauthorized`, `NotFound`,
/// `UpstreamFailure`) or an internal error.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch the current weather for one city.
    async fn get(&self, query: &WeatherByCity) -> Result<Weather>;
}
