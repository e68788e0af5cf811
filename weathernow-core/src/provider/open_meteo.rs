use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::info;

use crate::{
    api::{CURRENT_FIELDS, DAILY_FIELDS, HOURLY_FIELDS, RawForecastResponse},
    error::{Result, WeatherError},
    fetch::FetchClient,
    model::Coordinate,
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: Url,
    fetch: FetchClient,
}

impl OpenMeteoProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WeatherError::invalid_response(format!("Invalid URL '{base_url}': {e}")))?;
        Ok(Self { base_url, fetch: FetchClient::new(timeout)? })
    }

    /// `{base}/forecast` with the coordinate and the fixed field lists.
    pub fn forecast_url(&self, coordinate: Coordinate) -> Result<Url> {
        build_forecast_url(&self.base_url, coordinate)
    }
}

pub fn build_forecast_url(base_url: &Url, coordinate: Coordinate) -> Result<Url> {
    let endpoint = format!("{}/forecast", base_url.as_str().trim_end_matches('/'));

    Url::parse_with_params(
        &endpoint,
        &[
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("current", CURRENT_FIELDS.join(",")),
            ("hourly", HOURLY_FIELDS.join(",")),
            ("daily", DAILY_FIELDS.join(",")),
            ("timezone", "auto".to_string()),
        ],
    )
    .map_err(|e| WeatherError::invalid_response(format!("Invalid URL: {e}")))
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<RawForecastResponse> {
        let url = self.forecast_url(coordinate)?;
        info!("fetching forecast for {coordinate}");
        self.fetch.fetch(url).await
    }
}
