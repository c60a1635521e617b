//! Domain weather entity.
//!
//! Only the semantic fields survive the provider boundary: the city name and
//! the ordered list of conditions. Numeric readings (temperature, wind, ...)
//! are dropped by the provider adapter.

use serde::{Deserialize, Serialize};

/// Prefix shared by every per-city cache key.
pub const CITY_WEATHER_KEY: &str = "weather:city";

/// A single weather condition, e.g. `Rain` / `light rain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Condition group (Rain, Snow, Clouds, ...).
    pub condition: String,
    /// Human-readable description within the group.
    pub description: String,
}

impl Condition {
    pub fn new(condition: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            description: description.into(),
        }
    }
}

/// Current weather for a city.
///
/// `conditions` keeps the upstream ordering. It is normally non-empty, but
/// nothing enforces that; consumers must tolerate an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    /// City name as reported by the provider.
    pub city: String,
    /// Conditions in upstream order.
    pub conditions: Vec<Condition>,
}

impl Weather {
    /// Create a weather value with no conditions.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            conditions: Vec::new(),
        }
    }

    /// Append a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Normalized cache key for this value's city.
    pub fn cache_key(&self) -> String {
        city_key(&self.city)
    }
}

/// Case-normalized identity of a city. Two names differing only in case map
/// to the same identity.
pub fn normalize_city(city: &str) -> String {
    city.to_lowercase()
}

/// Cache key for a city: `weather:city:{lowercased city}`.
pub fn city_key(city: &str) -> String {
    format!("{CITY_WEATHER_KEY}:{}", normalize_city(city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_key_is_case_insensitive() {
        assert_eq!(city_key("Seoul"), city_key("SEOUL"));
        assert_eq!(city_key("seoul"), "weather:city:seoul");
    }

    #[test]
    fn cache_key_uses_city() {
        let weather = Weather::new("London");
        assert_eq!(weather.cache_key(), "weather:city:london");
    }

    #[test]
    fn with_condition_preserves_order() {
        let weather = Weather::new("Tokyo")
            .with_condition(Condition::new("Rain", "light rain"))
            .with_condition(Condition::new("Mist", "mist"));
        assert_eq!(weather.conditions[0].condition, "Rain");
        assert_eq!(weather.conditions[1].condition, "Mist");
    }

    #[test]
    fn serde_keeps_field_names() {
        let weather = Weather::new("Seoul").with_condition(Condition::new("Clear", "clear sky"));
        let json = serde_json::to_value(&weather).unwrap();
        assert_eq!(json["city"], "Seoul");
        assert_eq!(json["conditions"][0]["condition"], "Clear");
        assert_eq!(json["conditions"][0]["description"], "clear sky");
    }
}
