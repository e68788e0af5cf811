//! Plain-text rendering of a `WeatherState` snapshot.

use std::fmt::{self, Display, Formatter};

use chrono::{Local, TimeZone};
use weathernow_core::{
    ConditionDescriptor, Coordinate, CurrentWeather, DailyWeather, HourlyWeather, WeatherState,
    format::{
        format_date_in, format_hourly_time_in, format_temperature, format_time_in,
        format_uv_index, format_visibility, wind_direction,
    },
};

pub fn render(state: &WeatherState, fallback: Coordinate, hourly: bool) -> String {
    render_in(state, fallback, hourly, &Local)
}

pub fn render_in<Tz: TimeZone>(
    state: &WeatherState,
    fallback: Coordinate,
    hourly: bool,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    Report { state, fallback, hourly, tz }.to_string()
}

/// A snapshot laid out for the terminal in `tz`.
struct Report<'a, Tz> {
    state: &'a WeatherState,
    fallback: Coordinate,
    hourly: bool,
    tz: &'a Tz,
}

impl<Tz: TimeZone> Display for Report<'_, Tz>
where
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.state;

        match &state.location {
            Some(place) => {
                let mut parts = vec![place.display_name.as_str()];
                parts.extend(place.region.as_deref());
                if !place.country.is_empty() {
                    parts.push(&place.country);
                }
                writeln!(f, "{}", parts.join(", "))?;
                writeln!(f, "{}", place.coordinate)?;
            }
            None => writeln!(f, "Default location ({})", self.fallback)?,
        }

        let Some(current) = &state.current else {
            return Ok(());
        };
        write_current(f, current, self.tz)?;

        if self.hourly && !state.hourly.is_empty() {
            writeln!(f, "\nNext {} hours", state.hourly.len())?;
            for point in &state.hourly {
                write_hour(f, point, self.tz)?;
            }
        }

        if !state.daily.is_empty() {
            writeln!(f, "\nNext {} days", state.daily.len())?;
            for day in &state.daily {
                write_day(f, day, self.tz)?;
            }
        }

        Ok(())
    }
}

fn write_current<Tz: TimeZone>(f: &mut Formatter<'_>, current: &CurrentWeather, tz: &Tz) -> fmt::Result
where
    Tz::Offset: Display,
{
    writeln!(
        f,
        "\nNow {}  {}  (feels like {})",
        format_temperature(current.temp),
        summary(&current.conditions),
        format_temperature(current.feels_like),
    )?;
    writeln!(
        f,
        "  Humidity {}%  Pressure {} hPa  Wind {:.1} km/h {}  Visibility {}",
        current.humidity,
        current.pressure,
        current.wind_speed,
        wind_direction(current.wind_deg),
        format_visibility(current.visibility),
    )?;
    writeln!(
        f,
        "  Sunrise {}  Sunset {}",
        format_time_in(current.sunrise.timestamp(), tz),
        format_time_in(current.sunset.timestamp(), tz),
    )
}

fn write_hour<Tz: TimeZone>(f: &mut Formatter<'_>, point: &HourlyWeather, tz: &Tz) -> fmt::Result
where
    Tz::Offset: Display,
{
    writeln!(
        f,
        "  {}  {:>5}  {:>3}%  {}",
        format_hourly_time_in(point.dt.timestamp(), tz),
        format_temperature(point.temp),
        percent(point.pop),
        summary(&point.conditions),
    )
}

fn write_day<Tz: TimeZone>(f: &mut Formatter<'_>, day: &DailyWeather, tz: &Tz) -> fmt::Result
where
    Tz::Offset: Display,
{
    writeln!(
        f,
        "  {:<11}  {:>5} / {:>5}  {:>3}%  UV {}  {}",
        format_date_in(day.dt.timestamp(), tz),
        format_temperature(day.temp.min),
        format_temperature(day.temp.max),
        percent(day.pop),
        format_uv_index(day.uvi),
        summary(&day.conditions),
    )
}

fn summary(conditions: &[ConditionDescriptor]) -> &str {
    conditions.first().map_or("Unknown", |c| c.description.as_str())
}

fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use weathernow_core::{
        FeelsLike, Phase, ResolvedLocation, TemperatureRange, catalog::condition_for,
    };

    // Mon 2025-01-06 14:00 UTC
    const TS: i64 = 1_736_172_000;

    fn at(offset_hours: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(TS + offset_hours * 3600, 0).expect("valid")
    }

    fn fallback() -> Coordinate {
        Coordinate::new(37.7749, -122.4194).expect("valid")
    }

    fn ready_state() -> WeatherState {
        let current = CurrentWeather {
            dt: at(0),
            temp: 12.3,
            feels_like: 11.1,
            pressure: 1018,
            humidity: 81,
            uvi: 0.0,
            clouds: 0,
            visibility: 16_093,
            wind_speed: 7.2,
            wind_deg: 187,
            conditions: vec![condition_for(2)],
            sunrise: at(-7),
            sunset: at(3),
        };
        let hourly = (0..3)
            .map(|i| HourlyWeather {
                dt: at(i),
                temp: 10.0 + i as f64,
                feels_like: 9.0,
                pressure: 1013,
                humidity: 70,
                uvi: 0.0,
                clouds: 0,
                visibility: 10_000,
                wind_speed: 5.0,
                wind_deg: 90,
                conditions: vec![condition_for(61)],
                pop: 0.45,
            })
            .collect();
        let daily = vec![DailyWeather {
            dt: at(0),
            sunrise: at(-7),
            sunset: at(3),
            temp: TemperatureRange { day: 15.0, min: 5.0, max: 15.0, night: 5.0, eve: 15.0, morn: 5.0 },
            feels_like: FeelsLike { day: 13.0, night: 2.0, eve: 13.0, morn: 2.0 },
            pressure: 1013,
            humidity: 65,
            wind_speed: 10.0,
            wind_deg: 180,
            conditions: vec![condition_for(3)],
            clouds: 20,
            pop: 0.3,
            uvi: 2.5,
        }];

        WeatherState {
            phase: Phase::Ready,
            error: None,
            location: Some(ResolvedLocation {
                display_name: "San Francisco".into(),
                country: "United States".into(),
                region: Some("California".into()),
                coordinate: fallback(),
            }),
            current: Some(current),
            hourly,
            daily,
        }
    }

    #[test]
    fn renders_all_sections() {
        let out = render_in(&ready_state(), fallback(), true, &Utc);

        assert!(out.starts_with("San Francisco, California, United States\n37.7749, -122.4194\n"));
        assert!(out.contains("Now 12°C  Partly cloudy  (feels like 11°C)"));
        assert!(out.contains("Wind 7.2 km/h S  Visibility 16 km"));
        assert!(out.contains("Sunrise 7:00 AM  Sunset 5:00 PM"));
        assert!(out.contains("Next 3 hours"));
        assert!(out.contains("  14:00   10°C   45%  Slight rain"));
        assert!(out.contains("Next 1 days"));
        assert!(out.contains("Mon, Jan 6"));
        assert!(out.contains("5°C /  15°C   30%  UV 2.5  Overcast"));
    }

    #[test]
    fn hourly_table_can_be_left_out() {
        let out = render_in(&ready_state(), fallback(), false, &Utc);
        assert!(!out.contains("hours"));
        assert!(out.contains("Next 1 days"));
    }

    #[test]
    fn empty_state_shows_only_the_fallback_header() {
        let out = render_in(&WeatherState::default(), fallback(), true, &Utc);
        assert_eq!(out, "Default location (37.7749, -122.4194)\n");
    }
}
