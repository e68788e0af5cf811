//! Location resolution on top of an opaque platform capability.
//!
//! The platform supplies a permission state, a permission prompt and a
//! one-shot fix; a [`Geocoder`] turns a coordinate into placemarks.
//! [`LocationResolver`] combines them into the two requests the service
//! needs.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, WeatherError},
    model::{Coordinate, ResolvedLocation},
};

/// Locality used when a placemark has none.
const UNKNOWN_LOCALITY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    NotDetermined,
    AuthorizedWhenInUse,
    AuthorizedAlways,
    Denied,
    Restricted,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        )
    }
}

/// One reverse-geocoding result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placemark {
    pub locality: Option<String>,
    pub country: Option<String>,
    pub administrative_area: Option<String>,
}

/// Platform positioning capability.
#[async_trait]
pub trait LocationPlatform: Send + Sync + Debug {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Prompt for permission and wait for the decision.
    async fn request_authorization(&self) -> AuthorizationStatus;

    /// Request a single fresh fix.
    async fn request_fix(&self) -> Result<Coordinate>;
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Vec<Placemark>>;
}

/// What the weather service needs from location resolution.
#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    async fn current_coordinate(&self) -> Result<Coordinate>;

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<ResolvedLocation>;
}

#[derive(Debug)]
pub struct LocationResolver<P, G> {
    platform: P,
    geocoder: G,
    /// Serialises fix requests: a second caller waits for the first.
    pending: Mutex<()>,
}

impl<P: LocationPlatform, G: Geocoder> LocationResolver<P, G> {
    pub fn new(platform: P, geocoder: G) -> Self {
        Self {
            platform,
            geocoder,
            pending: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<P: LocationPlatform, G: Geocoder> LocationService for LocationResolver<P, G> {
    async fn current_coordinate(&self) -> Result<Coordinate> {
        let _pending = self.pending.lock().await;

        let status = match self.platform.authorization_status() {
            AuthorizationStatus::NotDetermined => {
                debug!("location permission undetermined, prompting");
                self.platform.request_authorization().await
            }
            status => status,
        };

        match status {
            s if s.is_authorized() => {
                let coordinate = self.platform.request_fix().await.map_err(as_location_error)?;
                info!("location fix at {coordinate}");
                Ok(coordinate)
            }
            AuthorizationStatus::NotDetermined => {
                Err(WeatherError::location("authorization not determined"))
            }
            _ => {
                warn!("location access {status:?}");
                Err(WeatherError::location("access denied"))
            }
        }
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<ResolvedLocation> {
        let placemarks = self
            .geocoder
            .reverse_geocode(coordinate)
            .await
            .map_err(as_location_error)?;

        let first = placemarks
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::location("no location found"))?;

        Ok(ResolvedLocation {
            display_name: first.locality.unwrap_or_else(|| UNKNOWN_LOCALITY.to_string()),
            country: first.country.unwrap_or_default(),
            region: first.administrative_area,
            coordinate,
        })
    }
}

fn as_location_error(err: WeatherError) -> WeatherError {
    match err {
        WeatherError::Location(_) => err,
        other => WeatherError::location(other.message()),
    }
}

/// Always-authorised platform that reports a preset coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationPlatform {
    coordinate: Coordinate,
}

impl FixedLocationPlatform {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationPlatform for FixedLocationPlatform {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::AuthorizedAlways
    }

    async fn request_authorization(&self) -> AuthorizationStatus {
        AuthorizationStatus::AuthorizedAlways
    }

    async fn request_fix(&self) -> Result<Coordinate> {
        Ok(self.coordinate)
    }
}
