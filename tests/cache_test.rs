//! Tests for the in-memory weather cache repository.

use std::collections::HashSet;
use std::time::Duration;

use vedrfolnir::cache::CacheConfig;
use vedrfolnir::{
    Condition, MemoryWeatherCache, Weather, WeatherByCities, WeatherByCity, WeatherCacheRepository,
};

fn weather(city: &str, condition: &str) -> Weather {
    Weather::new(city).with_condition(Condition::new(condition, condition.to_lowercase()))
}

#[tokio::test]
async fn get_one_missing_is_none() {
    let cache = MemoryWeatherCache::new();
    let got = cache.get_one(&WeatherByCity::new("Nowhere")).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn value_round_trips_structurally() {
    let cache = MemoryWeatherCache::new();
    let stored = weather("Seoul", "Rain").with_condition(Condition::new("Mist", "mist"));
    cache.put(&stored, Duration::from_secs(600)).await.unwrap();

    let got = cache.get_one(&WeatherByCity::new("Seoul")).await.unwrap();
    assert_eq!(got, Some(stored));
}

#[tokio::test]
async fn empty_conditions_are_stored() {
    let cache = MemoryWeatherCache::new();
    cache
        .put(&Weather::new("Quito"), Duration::from_secs(600))
        .await
        .unwrap();

    let got = cache.get_one(&WeatherByCity::new("Quito")).await.unwrap();
    assert_eq!(got.map(|w| w.conditions.len()), Some(0));
}

#[tokio::test]
async fn entries_expire_independently() {
    let cache = MemoryWeatherCache::new();
    cache
        .put(&weather("Seoul", "Clear"), Duration::from_secs(1))
        .await
        .unwrap();
    cache
        .put(&weather("Tokyo", "Clouds"), Duration::from_secs(10))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(cache.get_one(&WeatherByCity::new("Seoul")).await.unwrap().is_none());
    assert!(cache.get_one(&WeatherByCity::new("Tokyo")).await.unwrap().is_some());
}

#[tokio::test]
async fn overwrite_replaces_value_and_ttl() {
    let cache = MemoryWeatherCache::new();
    cache
        .put(&weather("Lima", "Clear"), Duration::from_millis(100))
        .await
        .unwrap();
    cache
        .put(&weather("LIMA", "Fog"), Duration::from_secs(600))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;

    let got = cache.get_one(&WeatherByCity::new("lima")).await.unwrap();
    let got = got.expect("overwritten entry should carry the new TTL");
    assert_eq!(got.city, "LIMA");
    assert_eq!(got.conditions[0].condition, "Fog");
}

#[tokio::test]
async fn get_many_omits_missing_cities() {
    let cache = MemoryWeatherCache::new();
    for city in ["Seoul", "London"] {
        cache
            .put(&weather(city, "Clear"), Duration::from_secs(600))
            .await
            .unwrap();
    }

    let got = cache
        .get_many(&WeatherByCities::new(["Seoul", "Tokyo", "London", "Paris"]))
        .await
        .unwrap();

    let cities: HashSet<String> = got.into_iter().map(|w| w.city).collect();
    assert_eq!(cities, HashSet::from(["Seoul".into(), "London".into()]));
}

#[tokio::test]
async fn get_many_empty_input() {
    let cache = MemoryWeatherCache::new();
    let got = cache.get_many(&WeatherByCities::default()).await.unwrap();
    assert!(got.is_empty());
}

#[tokio::test]
async fn get_many_skips_expired_entries() {
    let cache = MemoryWeatherCache::new();
    cache
        .put(&weather("Oslo", "Snow"), Duration::from_millis(50))
        .await
        .unwrap();
    cache
        .put(&weather("Rome", "Clear"), Duration::from_secs(600))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let got = cache
        .get_many(&WeatherByCities::new(["Oslo", "Rome"]))
        .await
        .unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].city, "Rome");
}

#[tokio::test]
async fn delete_missing_key_is_ok() {
    let cache = MemoryWeatherCache::with_config(&CacheConfig::new().max_entries(10));
    cache.delete("Nowhere").await.unwrap();
}
