//! Upstream weather providers.
//!
//! [`WeatherProvider`] is the capability the lookup service consumes.
//! [`OpenWeatherProvider`] implements it on top of [`OpenWeatherClient`],
//! which owns retry and failure classification.

pub mod openweather;
pub mod retry;
pub mod traits;

pub use openweather::{OpenWeatherClient, OpenWeatherProvider};
pub use retry::{RetryConfig, RetryFailure, with_retry};
pub use traits::WeatherProvider;
