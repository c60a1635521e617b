//! OpenWeather provider adapter.
//!
//! Translates a city query into a request on the shared
//! [`OpenWeatherClient`] and maps the response into [`Weather`].

mod client;
pub mod model;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::{
    AUTH_PARAM, DEFAULT_HOST, DEFAULT_TIMEOUT, OpenWeatherClient, classify_status, sanitize_params,
};
pub use model::WeatherResponse;

use super::traits::WeatherProvider;
use crate::Result;
use crate::types::{Weather, WeatherByCity};

/// Current weather by city name.
pub const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// [`WeatherProvider`] backed by the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: Arc<OpenWeatherClient>,
}

impl OpenWeatherProvider {
    pub fn new(client: Arc<OpenWeatherClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &str {
        "openweather"
    }

    async fn get(&self, query: &WeatherByCity) -> Result<Weather> {
        let response: WeatherResponse = self
            .client
            .get(CURRENT_WEATHER_PATH, &[("q", query.city.as_str())])
            .await?;
        Ok(response.into_domain())
    }
}
