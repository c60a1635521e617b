//! Core WeatherLookup trait

use async_trait::async_trait;

use crate::Result;
use crate::types::{Weather, WeatherByCities, WeatherByCity};

/// The lookup interface exposed to callers (API layers, the CLI).
///
/// Implementations decide where the data comes from; callers only see
/// weather values or a classified [`VedrfolnirError`](crate::VedrfolnirError)
/// whose [`status_code()`](crate::VedrfolnirError::status_code) they can surface.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Current weather for one city.
    async fn get_one(&self, query: &WeatherByCity) -> Result<Weather>;

    /// Current weather for a batch of cities.
    ///
    /// Every requested city appears exactly once in the result on success.
    /// The output order is not tied to the input order.
    async fn get_many(&self, query: &WeatherByCities) -> Result<Vec<Weather>>;
}
