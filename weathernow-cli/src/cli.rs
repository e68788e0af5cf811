use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing::debug;
use weathernow_core::{
    Config, Coordinate, FixedLocationPlatform, ForecastProvider, LocationResolver,
    NominatimGeocoder, WeatherService, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Forecasts from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the forecast endpoint and default location.
    Configure,

    /// Show current conditions, the next 24 hours and the next 7 days.
    Show {
        /// Latitude of the position to report on. Requires --lon.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the position to report on. Requires --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Leave out the hourly table.
        #[arg(long)]
        no_hourly: bool,
    },
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(config),
            Command::Show { lat, lon, no_hourly } => {
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
                    _ => None,
                };
                show(&config, position, !no_hourly).await
            }
        }
    }
}

async fn show(config: &Config, position: Option<Coordinate>, hourly: bool) -> anyhow::Result<()> {
    let provider: Arc<dyn ForecastProvider> = Arc::from(provider_from_config(config)?);
    let geocoder = NominatimGeocoder::new(&config.geocoding.base_url, &config.geocoding.user_agent)?;
    let platform = FixedLocationPlatform::new(position.unwrap_or(config.default_location));
    let resolver = LocationResolver::new(platform, geocoder);

    let service = WeatherService::new(Arc::new(resolver), provider, config.default_location);
    debug!(?service, "service ready");

    let outcome = match position {
        Some(_) => service.request_location().await,
        None => service.load_with_default_location().await,
    };

    let state = service.snapshot();
    print!("{}", render::render(&state, service.default_location(), hourly));

    outcome.context("forecast update failed")
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let base_url = Text::new("Forecast API base URL:")
        .with_default(&config.api.base_url)
        .prompt()?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.api.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    let latitude = CustomType::<f64>::new("Default latitude:")
        .with_default(config.default_location.latitude)
        .with_error_message("Please enter a number between -90 and 90")
        .prompt()?;

    let longitude = CustomType::<f64>::new("Default longitude:")
        .with_default(config.default_location.longitude)
        .with_error_message("Please enter a number between -180 and 180")
        .prompt()?;

    config.api.base_url = base_url.trim().to_string();
    config.api.timeout_secs = timeout_secs;
    config.set_default_location(Coordinate::new(latitude, longitude)?);

    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
