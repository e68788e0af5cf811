//! JSON payloads shaped like the live Open-Meteo and Nominatim responses.

#![allow(dead_code)]

use serde_json::{Value, json};

/// Forecast body with `hours` hourly and `days` daily aligned entries.
pub fn forecast_json(hours: usize, days: usize) -> Value {
    let hourly_times: Vec<String> =
        (0..hours).map(|i| format!("2025-01-{:02}T{:02}:00", 6 + i / 24, i % 24)).collect();
    let daily_times: Vec<String> = (0..days).map(|i| format!("2025-01-{:02}", 6 + i)).collect();

    json!({
        "latitude": 37.763283,
        "longitude": -122.41286,
        "generationtime_ms": 0.12,
        "utc_offset_seconds": -28800,
        "timezone": "America/Los_Angeles",
        "timezone_abbreviation": "PST",
        "elevation": 18.0,
        "current": {
            "time": "2025-01-06T06:00",
            "interval": 900,
            "temperature_2m": 9.4,
            "relative_humidity_2m": 88,
            "apparent_temperature": 7.9,
            "precipitation": 0.0,
            "weather_code": 45,
            "pressure_msl": 1021.7,
            "wind_speed_10m": 5.1,
            "wind_direction_10m": 187,
            "visibility": 4200.0
        },
        "hourly": {
            "time": hourly_times,
            "temperature_2m": (0..hours).map(|i| 8.0 + i as f64 * 0.5).collect::<Vec<_>>(),
            "relative_humidity_2m": vec![85; hours],
            "apparent_temperature": vec![7.0; hours],
            "precipitation_probability": vec![10; hours],
            "weather_code": vec![3; hours],
            "pressure_msl": vec![1021.2; hours],
            "wind_speed_10m": vec![6.4; hours],
            "wind_direction_10m": vec![270; hours],
            "visibility": vec![10000.0; hours]
        },
        "daily": {
            "time": daily_times,
            "weather_code": vec![61; days],
            "temperature_2m_max": vec![14.2; days],
            "temperature_2m_min": vec![7.1; days],
            "apparent_temperature_max": vec![12.0; days],
            "apparent_temperature_min": vec![4.4; days],
            "precipitation_probability_max": vec![70; days],
            "sunrise": vec!["2025-01-06T07:25"; days],
            "sunset": vec!["2025-01-06T17:07"; days],
            "uv_index_max": vec![2.1; days]
        }
    })
}

pub fn nominatim_json() -> Value {
    json!({
        "place_id": 297_093_563,
        "lat": "37.7792588",
        "lon": "-122.4193286",
        "display_name": "San Francisco, California, United States",
        "address": {
            "city": "San Francisco",
            "county": "San Francisco",
            "state": "California",
            "country": "United States",
            "country_code": "us"
        }
    })
}
