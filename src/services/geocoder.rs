// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Address geocoding against a Nominatim-compatible search API.
//!
//! Handles:
//! - Qualifying the free-text address with a fixed locality and country
//! - One request per call, no retry and no caching
//! - Mapping every failure to a [`GeocodeError`] reason the caller can log

use crate::models::facility::Coordinate;
use serde::Deserialize;
use std::time::Duration;

/// Locality and country appended to every address before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeHint {
    pub locality: String,
    pub country: String,
}

impl GeocodeHint {
    pub fn new(locality: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            locality: locality.into(),
            country: country.into(),
        }
    }

    /// `"{address}, {locality}, {country}"`
    pub fn qualify(&self, address: &str) -> String {
        format!("{}, {}, {}", address.trim(), self.locality, self.country)
    }
}

impl Default for GeocodeHint {
    fn default() -> Self {
        Self::new("Khariar", "India")
    }
}

/// Geocoding client.
#[derive(Clone)]
pub struct GeocoderService {
    http: reqwest::Client,
    base_url: String,
}

impl GeocoderService {
    /// Create a client for the given search API. Nominatim's usage policy
    /// requires an identifying user agent.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve an address to a position.
    ///
    /// Returns `Ok(None)` for blank input without touching the network.
    pub async fn geocode(
        &self,
        address: &str,
        hint: &GeocodeHint,
    ) -> Result<Option<Coordinate>, GeocodeError> {
        if address.trim().is_empty() {
            return Ok(None);
        }

        let query = hint.qualify(address);
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query = %query, "Geocoding address");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(GeocodeError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let place = places.into_iter().next().ok_or(GeocodeError::NoMatch)?;
        let coordinate = place.coordinate()?;

        tracing::debug!(
            lat = coordinate.lat,
            lon = coordinate.lon,
            display_name = place.display_name.as_deref().unwrap_or(""),
            "Address geocoded"
        );
        Ok(Some(coordinate))
    }
}

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| GeocodeError::Parse(format!("bad coordinate {raw:?}: {e}")))
        };
        let coordinate = Coordinate::new(parse(&self.lat)?, parse(&self.lon)?);
        if !coordinate.is_valid() {
            return Err(GeocodeError::Parse(format!(
                "coordinate out of range: {}, {}",
                coordinate.lat, coordinate.lon
            )));
        }
        Ok(coordinate)
    }
}

/// Why an address could not be resolved. Never fatal: the map is shown
/// without a user location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Geocoding service returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse geocoding response: {0}")]
    Parse(String),

    #[error("No location found for that address")]
    NoMatch,
}

impl GeocodeError {
    fn from_request(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodeError::Timeout
        } else {
            GeocodeError::Request(e.to_string())
        }
    }

    /// Stable reason code reported to the client.
    pub fn code(&self) -> &'static str {
        match self {
            GeocodeError::NoMatch => "geocode_no_match",
            _ => "geocode_unavailable",
        }
    }

    /// Short message suitable for showing next to the address box.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodeError::NoMatch => "No location found for that address",
            _ => "Geocoding service unavailable",
        }
    }
}
