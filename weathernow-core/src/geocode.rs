//! Reverse geocoding over Nominatim (OpenStreetMap). No API key required,
//! but the usage policy asks for an identifying user agent.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    fetch::FetchClient,
    location::{Geocoder, Placemark},
    model::Coordinate,
};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_GEOCODER_USER_AGENT: &str =
    concat!("weathernow/", env!("CARGO_PKG_VERSION"), " (reverse geocoding)");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl From<NominatimAddress> for Placemark {
    fn from(addr: NominatimAddress) -> Self {
        // Prefer city > town > village > municipality for the locality
        let locality = addr
            .city
            .or(addr.town)
            .or(addr.village)
            .or(addr.municipality)
            .or(addr.county);

        Placemark {
            locality,
            country: addr.country,
            administrative_area: addr.state,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: Url,
    fetch: FetchClient,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WeatherError::invalid_response(format!("Invalid URL '{base_url}': {e}")))?;
        Ok(Self {
            base_url,
            fetch: FetchClient::with_user_agent(REQUEST_TIMEOUT, user_agent)?,
        })
    }

    fn reverse_url(&self, coordinate: Coordinate) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("zoom", "10");
        url
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Vec<Placemark>> {
        let body: NominatimResponse = self.fetch.fetch(self.reverse_url(coordinate)).await?;

        let placemarks: Vec<Placemark> = body.address.map(Placemark::from).into_iter().collect();
        debug!("reverse geocoded {coordinate} to {} placemark(s)", placemarks.len());
        Ok(placemarks)
    }
}
