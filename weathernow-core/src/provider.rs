use async_trait::async_trait;
use std::fmt::Debug;

use crate::{api::RawForecastResponse, config::Config, error::Result, model::Coordinate};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Source of raw forecasts for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, coordinate: Coordinate) -> Result<RawForecastResponse>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>> {
    let provider = OpenMeteoProvider::new(&config.api.base_url, config.api.timeout())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_builds() {
        assert!(provider_from_config(&Config::default()).is_ok());
    }

    #[test]
    fn provider_from_config_rejects_bad_base_url() {
        let mut cfg = Config::default();
        cfg.api.base_url = "not a url".to_string();

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
