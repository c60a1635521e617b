//! OpenWeather "current weather" response schema.
//!
//! Only the fields the domain needs are required; the informational ones
//! are optional and everything else in the payload is ignored.
//! See: <https://openweathermap.org/current>

use serde::Deserialize;

use crate::types::{Condition, Weather};

/// Response body of `GET /data/2.5/weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    /// City name.
    pub name: String,
    /// Weather condition list, most relevant first.
    pub weather: Vec<ConditionEntry>,
    /// City id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Time of data calculation, unix, UTC.
    #[serde(default)]
    pub dt: Option<i64>,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// One entry of the `weather` array.
///
/// Condition codes: <https://openweathermap.org/weather-conditions>
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub id: Option<u32>,
    /// Group of weather parameters (Rain, Snow, Clouds etc.)
    pub main: String,
    /// Weather condition within the group
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl WeatherResponse {
    /// Map into the domain entity, keeping condition order.
    pub fn into_domain(self) -> Weather {
        Weather {
            city: self.name,
            conditions: self
                .weather
                .into_iter()
                .map(|entry| Condition::new(entry.main, entry.description))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_full_payload() {
        let json = serde_json::json!({
            "coord": {"lon": 126.9778, "lat": 37.5683},
            "weather": [
                {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "base": "stations",
            "main": {"temp": 288.1, "feels_like": 287.6, "pressure": 1012, "humidity": 80,
                     "temp_min": 287.0, "temp_max": 289.0},
            "visibility": 10000,
            "wind": {"speed": 3.6, "deg": 250},
            "clouds": {"all": 75},
            "dt": 1700000000,
            "sys": {"country": "KR", "sunrise": 1699999000, "sunset": 1700030000},
            "timezone": 32400,
            "id": 1835848,
            "name": "Seoul",
            "cod": 200
        });

        let response: WeatherResponse = serde_json::from_value(json).unwrap();
        let weather = response.into_domain();
        assert_eq!(weather.city, "Seoul");
        assert_eq!(
            weather.conditions,
            vec![
                Condition::new("Rain", "light rain"),
                Condition::new("Mist", "mist"),
            ]
        );
    }

    #[test]
    fn minimal_payload_is_accepted() {
        let json = serde_json::json!({
            "name": "Tokyo",
            "weather": [{"main": "Clear", "description": "clear sky"}]
        });
        let response: WeatherResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.id, None);
        assert_eq!(response.into_domain().conditions.len(), 1);
    }

    #[test]
    fn empty_condition_list_maps_to_empty() {
        let json = serde_json::json!({"name": "Nowhere", "weather": []});
        let response: WeatherResponse = serde_json::from_value(json).unwrap();
        assert!(response.into_domain().conditions.is_empty());
    }

    #[test]
    fn missing_name_is_rejected() {
        let json = serde_json::json!({"weather": []});
        assert!(serde_json::from_value::<WeatherResponse>(json).is_err());
    }
}
