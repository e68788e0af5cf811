//! Converts the API's parallel-array payload into self-contained points.
//!
//! An index that is absent or `null` in any array a point needs is skipped;
//! the surrounding indices are unaffected. Hourly and daily timestamps are
//! synthesised from the acquisition clock rather than read from the API's
//! `time` arrays.

use chrono::{
    DateTime, Days, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{CurrentBlock, DailySeries, HourlySeries, RawForecastResponse};
use crate::catalog::condition_for;
use crate::model::{
    CurrentWeather, DailyWeather, FeelsLike, ForecastBundle, HourlyWeather, TemperatureRange,
};

pub const HOURLY_LIMIT: usize = 24;
pub const DAILY_LIMIT: usize = 7;

/// Local wall-clock hours used for every daily sunrise/sunset.
pub const DAILY_SUNRISE_HOUR: u32 = 6;
pub const DAILY_SUNSET_HOUR: u32 = 18;

// The daily series carries none of these; fixed values are filled in.
pub const DAILY_PRESSURE_HPA: i32 = 1013;
pub const DAILY_HUMIDITY_PCT: i32 = 65;
pub const DAILY_WIND_SPEED: f64 = 10.0;
pub const DAILY_WIND_DEG: i32 = 180;
pub const DAILY_CLOUDS_PCT: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("unrecognised timestamp '{0}'")]
    Unrecognised(String),
    #[error("timestamp '{0}' has no offset and none was supplied")]
    MissingOffset(String),
    #[error("timestamp '{0}' does not map to a single instant")]
    Ambiguous(String),
}

/// Parse an API time string: RFC 3339, or the offset-less local form
/// (`2025-01-06T14:00`) resolved with `utc_offset_seconds`.
pub fn parse_api_timestamp(
    value: &str,
    utc_offset_seconds: Option<i32>,
) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| TimestampError::Unrecognised(value.to_string()))?;

    let offset = utc_offset_seconds
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| TimestampError::MissingOffset(value.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimestampError::Ambiguous(value.to_string()))
}

/// Normalise against the local clock.
pub fn normalize(raw: &RawForecastResponse) -> ForecastBundle {
    normalize_at(raw, Local::now())
}

/// Normalise with an explicit acquisition time. Deterministic for a given
/// `now`.
pub fn normalize_at<Tz: TimeZone>(raw: &RawForecastResponse, now: DateTime<Tz>) -> ForecastBundle {
    let current = current_weather(&raw.current, &raw.daily, raw.utc_offset_seconds, &now);
    let hourly = hourly_forecast(&raw.hourly, &now);
    let daily = daily_forecast(&raw.daily, &now);

    debug!(
        hourly = hourly.len(),
        daily = daily.len(),
        "normalized forecast for {}, {}",
        raw.latitude,
        raw.longitude
    );

    ForecastBundle { current, hourly, daily }
}

fn current_weather<Tz: TimeZone>(
    block: &CurrentBlock,
    daily: &DailySeries,
    utc_offset_seconds: Option<i32>,
    now: &DateTime<Tz>,
) -> CurrentWeather {
    let dt = parse_api_timestamp(&block.time, utc_offset_seconds).unwrap_or_else(|err| {
        debug!("{err}; using acquisition time");
        now.with_timezone(&Utc)
    });

    let first_parsed = |series: &[Option<String>]| {
        series
            .first()
            .and_then(Option::as_deref)
            .and_then(|s| parse_api_timestamp(s, utc_offset_seconds).ok())
            .unwrap_or(dt)
    };

    CurrentWeather {
        dt,
        temp: block.temperature,
        feels_like: block.apparent_temperature,
        pressure: round_to_i32(block.pressure_msl),
        humidity: block.relative_humidity,
        uvi: 0.0,
        clouds: 0,
        visibility: round_to_i32(block.visibility),
        wind_speed: block.wind_speed,
        wind_deg: block.wind_direction,
        conditions: vec![condition_for(block.weather_code)],
        sunrise: first_parsed(&daily.sunrise),
        sunset: first_parsed(&daily.sunset),
    }
}

fn hourly_forecast<Tz: TimeZone>(series: &HourlySeries, now: &DateTime<Tz>) -> Vec<HourlyWeather> {
    let start = start_of_hour(now);
    let limit = series.time.len().min(HOURLY_LIMIT);

    (0..limit)
        .filter_map(|i| {
            let dt = start + TimeDelta::hours(i as i64);
            let point = hourly_point(series, i, dt);
            if point.is_none() {
                warn!(index = i, "hourly entry missing from one or more series, skipped");
            }
            point
        })
        .collect()
}

fn hourly_point(s: &HourlySeries, i: usize, dt: DateTime<Utc>) -> Option<HourlyWeather> {
    Some(HourlyWeather {
        dt,
        temp: at(&s.temperature, i)?,
        feels_like: at(&s.apparent_temperature, i)?,
        pressure: round_to_i32(at(&s.pressure_msl, i)?),
        humidity: at(&s.relative_humidity, i)?,
        uvi: 0.0,
        clouds: 0,
        visibility: round_to_i32(at(&s.visibility, i)?),
        wind_speed: at(&s.wind_speed, i)?,
        wind_deg: at(&s.wind_direction, i)?,
        conditions: vec![condition_for(at(&s.weather_code, i)?)],
        pop: percent_to_fraction(at(&s.precipitation_probability, i)?),
    })
}

fn daily_forecast<Tz: TimeZone>(series: &DailySeries, now: &DateTime<Tz>) -> Vec<DailyWeather> {
    let limit = series.time.len().min(DAILY_LIMIT);

    (0..limit)
        .filter_map(|i| {
            let day = days_after(now, i as u64);
            let point = daily_point(series, i, &day);
            if point.is_none() {
                warn!(index = i, "daily entry missing from one or more series, skipped");
            }
            point
        })
        .collect()
}

fn daily_point<Tz: TimeZone>(s: &DailySeries, i: usize, day: &DateTime<Tz>) -> Option<DailyWeather> {
    let code = at(&s.weather_code, i)?;
    let max = at(&s.temperature_max, i)?;
    let min = at(&s.temperature_min, i)?;
    let feels_max = at(&s.apparent_temperature_max, i)?;
    let feels_min = at(&s.apparent_temperature_min, i)?;
    let pop = at(&s.precipitation_probability_max, i)?;
    let uvi = at(&s.uv_index_max, i)?;
    // Present-check only: sun times are synthesised below.
    s.sunrise.get(i)?.as_ref()?;
    s.sunset.get(i)?.as_ref()?;

    let dt = day.with_timezone(&Utc);

    Some(DailyWeather {
        dt,
        sunrise: at_local_hour(day, DAILY_SUNRISE_HOUR).unwrap_or(dt),
        sunset: at_local_hour(day, DAILY_SUNSET_HOUR).unwrap_or(dt),
        temp: TemperatureRange {
            day: max,
            min,
            max,
            night: min,
            eve: max,
            morn: min,
        },
        feels_like: FeelsLike {
            day: feels_max,
            night: feels_min,
            eve: feels_max,
            morn: feels_min,
        },
        pressure: DAILY_PRESSURE_HPA,
        humidity: DAILY_HUMIDITY_PCT,
        wind_speed: DAILY_WIND_SPEED,
        wind_deg: DAILY_WIND_DEG,
        conditions: vec![condition_for(code)],
        clouds: DAILY_CLOUDS_PCT,
        pop: percent_to_fraction(pop),
        uvi,
    })
}

fn at<T: Copy>(series: &[Option<T>], i: usize) -> Option<T> {
    series.get(i).copied().flatten()
}

/// Local hour boundary at or before `now`, computed on the instant so a
/// repeated or skipped wall-clock hour cannot defeat it.
fn start_of_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.with_timezone(&Utc)
        - TimeDelta::minutes(i64::from(now.minute()))
        - TimeDelta::seconds(i64::from(now.second()))
        - TimeDelta::nanoseconds(i64::from(now.nanosecond()))
}

/// Same wall-clock time `days` later. The earlier instant is taken in a
/// fold; in a gap the day is advanced in absolute time instead.
fn days_after<Tz: TimeZone>(now: &DateTime<Tz>, days: u64) -> DateTime<Tz> {
    now.naive_local()
        .checked_add_days(Days::new(days))
        .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest())
        .unwrap_or_else(|| now.clone() + TimeDelta::days(days as i64))
}

/// `hour:00:00` on `day`'s calendar date in `day`'s own timezone.
fn at_local_hour<Tz: TimeZone>(day: &DateTime<Tz>, hour: u32) -> Option<DateTime<Utc>> {
    let naive = day.date_naive().and_hms_opt(hour, 0, 0)?;
    day.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn percent_to_fraction(percent: i32) -> f64 {
    f64::from(percent) / 100.0
}

fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}
