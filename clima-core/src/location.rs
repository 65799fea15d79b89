//! Device position sources.
//!
//! A terminal has no geolocation service, so the "device position" comes from
//! one of: coordinates in the config, an IP geolocation lookup, or nothing at
//! all (the user must search for a city).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{
    config::{Config, DEFAULT_LOCATION_LOOKUP_URL, LocationMode},
    error::LocationError,
    model::Coordinates,
};

const LOOKUP_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Location turned off, the equivalent of a denied permission prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl LocationSource for Unavailable {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Disabled)
    }
}

/// Approximate position from the public IP, via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpLocation {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocation {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_LOCATION_LOOKUP_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }
}

impl Default for IpLocation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationSource for IpLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let url = format!("{}/json", self.base_url);
        tracing::debug!(%url, "Looking up position from public IP");

        let res = self
            .http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(LocationError::Network)?;

        if !res.status().is_success() {
            return Err(LocationError::Unavailable(format!(
                "lookup returned status {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res.json().await.map_err(LocationError::Network)?;

        if body.status != "success" {
            return Err(LocationError::Unavailable(
                body.message.unwrap_or_else(|| body.status.clone()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                "lookup response had no coordinates".to_string(),
            )),
        }
    }
}

/// Build the location source selected in the config.
///
/// `Fixed` without both coordinates degrades to `Unavailable`.
pub fn location_from_config(config: &Config) -> Box<dyn LocationSource> {
    match config.location.mode {
        LocationMode::Ip => Box::new(IpLocation::with_base_url(config.location_lookup_url())),
        LocationMode::Fixed => match config.fixed_coordinates() {
            Some(coords) => Box::new(FixedLocation(coords)),
            None => {
                tracing::warn!("Location mode is 'fixed' but latitude/longitude are missing");
                Box::new(Unavailable)
            }
        },
        LocationMode::Disabled => Box::new(Unavailable),
    }
}
