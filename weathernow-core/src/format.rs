//! Display helpers for forecast points.
//!
//! Timestamps are epoch seconds. Each formatter has an `_in` variant taking
//! an explicit timezone; the plain version uses the machine's local zone.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const DATE_PATTERN: &str = "%a, %b %-d";
const TIME_PATTERN: &str = "%-I:%M %p";
const HOURLY_PATTERN: &str = "%H:%M";

/// Placeholder for timestamps chrono cannot represent.
const INVALID_TIMESTAMP: &str = "--";

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// `"Mon, Jan 6"`
pub fn format_date(timestamp: i64) -> String {
    format_date_in(timestamp, &Local)
}

pub fn format_date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    format_with(timestamp, tz, DATE_PATTERN)
}

/// `"6:05 AM"`
pub fn format_time(timestamp: i64) -> String {
    format_time_in(timestamp, &Local)
}

pub fn format_time_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    format_with(timestamp, tz, TIME_PATTERN)
}

/// `"14:00"`
pub fn format_hourly_time(timestamp: i64) -> String {
    format_hourly_time_in(timestamp, &Local)
}

pub fn format_hourly_time_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    format_with(timestamp, tz, HOURLY_PATTERN)
}

fn format_with<Tz: TimeZone>(timestamp: i64, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format(pattern).to_string(),
        None => INVALID_TIMESTAMP.to_string(),
    }
}

/// 16-point compass label, N at index 0.
pub fn wind_direction(degrees: i32) -> &'static str {
    let index = (f64::from(degrees) / 22.5).round() as i64;
    COMPASS[index.rem_euclid(16) as usize]
}

/// Whole kilometres, truncated.
pub fn format_visibility(metres: i32) -> String {
    format!("{} km", metres / 1000)
}

pub fn format_uv_index(uvi: f64) -> String {
    format!("{uvi:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2025-01-06T14:05:00Z, a Monday
    const TS: i64 = 1_736_172_300;

    #[test]
    fn temperature_rounds_half_away_from_zero() {
        assert_eq!(format_temperature(22.5), "23°C");
        assert_eq!(format_temperature(22.4), "22°C");
        assert_eq!(format_temperature(-0.6), "-1°C");
    }

    #[test]
    fn date_time_patterns_in_utc() {
        assert_eq!(format_date_in(TS, &Utc), "Mon, Jan 6");
        assert_eq!(format_time_in(TS, &Utc), "2:05 PM");
        assert_eq!(format_hourly_time_in(TS, &Utc), "14:05");
    }

    #[test]
    fn patterns_follow_timezone() {
        let tz = FixedOffset::west_opt(8 * 3600).expect("valid offset");
        assert_eq!(format_hourly_time_in(TS, &tz), "06:05");
        assert_eq!(format_time_in(TS, &tz), "6:05 AM");
    }

    #[test]
    fn unrepresentable_timestamp_yields_placeholder() {
        assert_eq!(format_hourly_time_in(i64::MAX, &Utc), "--");
    }

    #[test]
    fn wind_direction_compass_points() {
        assert_eq!(wind_direction(0), "N");
        assert_eq!(wind_direction(11), "N");
        assert_eq!(wind_direction(12), "NNE");
        assert_eq!(wind_direction(90), "E");
        assert_eq!(wind_direction(187), "S");
        assert_eq!(wind_direction(270), "W");
        assert_eq!(wind_direction(350), "N");
        assert_eq!(wind_direction(360), "N");
    }

    #[test]
    fn wind_direction_wraps_negative_degrees() {
        assert_eq!(wind_direction(-90), "W");
    }

    #[test]
    fn visibility_and_uv() {
        assert_eq!(format_visibility(24_140), "24 km");
        assert_eq!(format_visibility(900), "0 km");
        assert_eq!(format_uv_index(3.46), "3.5");
    }
}
