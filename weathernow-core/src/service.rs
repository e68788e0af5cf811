//! The weather service: sequences location → fetch → normalise and owns
//! the state presented to the user.
//!
//! State is published through a `watch` channel. The service is its only
//! writer; readers get consistent snapshots of the whole struct, but
//! `location` and the forecast fields are written separately and may settle
//! in either order.
//!
//! Overlapping commands do not cancel each other. Every command starts a
//! new cycle; a cycle that has been superseded by a newer one drops its
//! results instead of publishing them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, WeatherError},
    location::LocationService,
    model::{Coordinate, CurrentWeather, DailyWeather, HourlyWeather, ResolvedLocation},
    normalize::normalize,
    provider::ForecastProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything a front end renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub phase: Phase,
    /// Error of the most recent cycle; cleared when a new cycle starts.
    pub error: Option<WeatherError>,
    pub location: Option<ResolvedLocation>,
    pub current: Option<CurrentWeather>,
    pub hourly: Vec<HourlyWeather>,
    pub daily: Vec<DailyWeather>,
}

impl WeatherState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

pub struct WeatherService {
    location: Arc<dyn LocationService>,
    provider: Arc<dyn ForecastProvider>,
    default_location: Coordinate,
    state: watch::Sender<WeatherState>,
    cycle: AtomicU64,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("location", &self.location)
            .field("provider", &self.provider)
            .field("default_location", &self.default_location)
            .field("cycle", &self.cycle.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    pub fn new(
        location: Arc<dyn LocationService>,
        provider: Arc<dyn ForecastProvider>,
        default_location: Coordinate,
    ) -> Self {
        let (state, _) = watch::channel(WeatherState::default());
        Self {
            location,
            provider,
            default_location,
            state,
            cycle: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    pub fn default_location(&self) -> Coordinate {
        self.default_location
    }

    /// Resolve the device position and place name, then fetch its forecast.
    ///
    /// The place name is published after the forecast request has been
    /// made, whether or not that request succeeded.
    pub async fn request_location(&self) -> Result<()> {
        let cycle = self.begin_cycle();

        let resolved = async {
            let coordinate = self.location.current_coordinate().await?;
            let place = self.location.reverse_geocode(coordinate).await?;
            Ok::<_, WeatherError>((coordinate, place))
        }
        .await;

        let (coordinate, place) = match resolved {
            Ok(found) => found,
            Err(err) => {
                self.fail(cycle, err.clone());
                return Err(err);
            }
        };

        let outcome = self.fetch_and_publish(cycle, coordinate).await;

        let name = place.display_name.clone();
        if self.publish(cycle, |s| s.location = Some(place)) {
            info!("location set to {name}");
        }

        outcome
    }

    /// Fetch the forecast for the configured fallback coordinate without
    /// touching location services.
    pub async fn load_with_default_location(&self) -> Result<()> {
        let cycle = self.begin_cycle();
        self.fetch_and_publish(cycle, self.default_location).await
    }

    async fn fetch_and_publish(&self, cycle: u64, coordinate: Coordinate) -> Result<()> {
        match self.provider.fetch_forecast(coordinate).await {
            Ok(raw) => {
                let bundle = normalize(&raw);
                info!(
                    cycle,
                    hourly = bundle.hourly.len(),
                    daily = bundle.daily.len(),
                    "forecast ready"
                );
                self.publish(cycle, |s| {
                    s.current = Some(bundle.current);
                    s.hourly = bundle.hourly;
                    s.daily = bundle.daily;
                    s.phase = Phase::Ready;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(cycle, err.clone());
                Err(err)
            }
        }
    }

    fn begin_cycle(&self) -> u64 {
        let mut cycle = 0;
        self.state.send_modify(|s| {
            cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
            s.phase = Phase::Loading;
            s.error = None;
        });
        debug!(cycle, "fetch cycle started");
        cycle
    }

    /// Forecast data from earlier cycles is left in place.
    fn fail(&self, cycle: u64, err: WeatherError) {
        warn!(cycle, "fetch cycle failed: {err}");
        self.publish(cycle, |s| {
            s.phase = Phase::Failed;
            s.error = Some(err);
        });
    }

    /// Apply `update` if `cycle` is still the newest one.
    fn publish(&self, cycle: u64, update: impl FnOnce(&mut WeatherState)) -> bool {
        let published = self.state.send_if_modified(|s| {
            if self.cycle.load(Ordering::SeqCst) != cycle {
                return false;
            }
            update(s);
            true
        });
        if !published {
            debug!(cycle, "cycle superseded, result dropped");
        }
        published
    }
}
