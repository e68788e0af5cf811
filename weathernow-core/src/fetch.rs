//! Single-attempt typed HTTP GET.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, WeatherError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("weathernow/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
}

impl FetchClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_user_agent(timeout, USER_AGENT)
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| WeatherError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// GET `url` and decode the body as `T`.
    ///
    /// Fails with `Network` on transport errors or any status other than 200,
    /// and with `Decoding` when the body does not match `T`. Intermediate
    /// caches are bypassed.
    pub async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");

        let res = self
            .http
            .get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                warn!("request failed: {e}");
                WeatherError::from(e)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!("unexpected status {status}");
            return Err(WeatherError::network(format!("HTTP {}", status.as_u16())));
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("failed to decode {} byte body: {e}", body.len());
            WeatherError::decoding(e.to_string())
        })
    }
}
