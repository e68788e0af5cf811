//! Payload builders shared by unit tests.

use crate::api::{CurrentBlock, DailySeries, HourlySeries, RawForecastResponse};

/// `n` aligned hourly entries; temperature is `10 + i`, apparent `9 + i`.
pub fn hourly_series(n: usize) -> HourlySeries {
    HourlySeries {
        time: (0..n).map(|i| format!("2025-01-06T{:02}:00", i % 24)).collect(),
        temperature: (0..n).map(|i| Some(10.0 + i as f64)).collect(),
        relative_humidity: vec![Some(70); n],
        apparent_temperature: (0..n).map(|i| Some(9.0 + i as f64)).collect(),
        precipitation_probability: vec![Some(45); n],
        weather_code: vec![Some(61); n],
        pressure_msl: vec![Some(1012.6); n],
        wind_speed: vec![Some(12.5); n],
        wind_direction: vec![Some(200); n],
        visibility: vec![Some(24_140.4); n],
    }
}

/// `n` aligned daily entries; max is `15 + i`, min `5 + i`.
pub fn daily_series(n: usize) -> DailySeries {
    DailySeries {
        time: (0..n).map(|i| format!("2025-01-{:02}", 6 + i)).collect(),
        weather_code: vec![Some(3); n],
        temperature_max: (0..n).map(|i| Some(15.0 + i as f64)).collect(),
        temperature_min: (0..n).map(|i| Some(5.0 + i as f64)).collect(),
        apparent_temperature_max: vec![Some(13.0); n],
        apparent_temperature_min: vec![Some(2.0); n],
        precipitation_probability_max: vec![Some(30); n],
        sunrise: vec![Some("2025-01-06T07:21".to_string()); n],
        sunset: vec![Some("2025-01-06T17:02".to_string()); n],
        uv_index_max: vec![Some(2.5); n],
    }
}

/// San Francisco payload, local time at UTC-8.
pub fn raw_response(hours: usize, days: usize) -> RawForecastResponse {
    RawForecastResponse {
        latitude: 37.7749,
        longitude: -122.4194,
        timezone: "America/Los_Angeles".to_string(),
        timezone_abbreviation: "PST".to_string(),
        elevation: 16.0,
        utc_offset_seconds: Some(-8 * 3600),
        current: CurrentBlock {
            time: "2025-01-06T06:00".to_string(),
            temperature: 12.3,
            relative_humidity: 81,
            apparent_temperature: 11.1,
            precipitation: 0.0,
            weather_code: 2,
            pressure_msl: 1018.44,
            wind_speed: 7.2,
            wind_direction: 187,
            visibility: 16_093.0,
        },
        hourly: hourly_series(hours),
        daily: daily_series(days),
    }
}
