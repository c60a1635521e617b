//! Public types for the Vedrfolnir API.

mod query;
mod weather;

pub use query::{WeatherByCities, WeatherByCity};
pub use weather::{CITY_WEATHER_KEY, Condition, Weather, city_key, normalize_city};
