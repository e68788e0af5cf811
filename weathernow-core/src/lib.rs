//! Core library for the `weathernow` client.
//!
//! This crate defines:
//! - The Open-Meteo wire shape and a single-attempt fetch client
//! - Normalisation of parallel-array forecasts into per-timepoint records
//! - The weather-code catalog and display formatting helpers
//! - Location resolution over an opaque platform capability
//! - `WeatherService`, which sequences the above and publishes state
//!
//! It is used by `weathernow-cli`, but any front end can drive
//! `WeatherService` and render its `WeatherState`.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod geocode;
pub mod location;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;

#[cfg(test)]
mod test_support;

pub use api::RawForecastResponse;
pub use catalog::{CatalogEntry, ColorKey, IconKey, describe};
pub use config::Config;
pub use error::{ErrorKind, Result, WeatherError};
pub use fetch::FetchClient;
pub use geocode::NominatimGeocoder;
pub use location::{
    AuthorizationStatus, FixedLocationPlatform, Geocoder, LocationPlatform, LocationResolver,
    LocationService, Placemark,
};
pub use model::{
    ConditionDescriptor, Coordinate, CurrentWeather, DailyWeather, FeelsLike, ForecastBundle,
    HourlyWeather, ResolvedLocation, TemperatureRange,
};
pub use normalize::{normalize, normalize_at};
pub use provider::{ForecastProvider, OpenMeteoProvider, provider_from_config};
pub use service::{Phase, WeatherService, WeatherState};
