//! Lookup queries.

use serde::{Deserialize, Serialize};

/// Look up the weather for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherByCity {
    pub city: String,
}

impl WeatherByCity {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Look up the weather for a batch of cities. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherByCities {
    pub cities: Vec<String>,
}

impl WeatherByCities {
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
