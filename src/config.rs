//! Application configuration loaded from environment variables.
//!
//! Every setting has a default matching the Khariar deployment, so an
//! unconfigured process fetches the published nursery sheet and boundary.

use crate::services::geocoder::GeocodeHint;
use std::env;
use std::time::Duration;

const DEFAULT_DATA_SOURCE: &str =
    "https://github.com/your-username/nursery-locator/raw/main/NURSARY.xlsx";
const DEFAULT_BOUNDARY_SOURCE: &str =
    "https://github.com/your-username/nursery-locator/raw/main/khariar_boundary.geojson";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Nursery sheet location (URL or local path, CSV or XLSX)
    pub data_source: String,
    /// Boundary GeoJSON location (URL or local path)
    pub boundary_source: String,
    /// Base URL of the Nominatim-compatible geocoder
    pub geocoder_url: String,
    /// User agent sent to the geocoder
    pub geocoder_user_agent: String,
    /// Per-request geocoder timeout
    pub geocoder_timeout: Duration,
    /// Locality and country appended to every address
    pub geocode_hint: GeocodeHint,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            boundary_source: DEFAULT_BOUNDARY_SOURCE.to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            geocoder_user_agent: "khariar_app".to_string(),
            geocoder_timeout: Duration::from_secs(10),
            geocode_hint: GeocodeHint::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |key: &'static str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let geocoder_timeout = match lookup("GEOCODER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "GEOCODER_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => defaults.geocoder_timeout,
        };

        Ok(Self {
            port,
            frontend_url: string("FRONTEND_URL", defaults.frontend_url),
            data_source: string("NURSERY_DATA_SOURCE", defaults.data_source),
            boundary_source: string("BOUNDARY_SOURCE", defaults.boundary_source),
            geocoder_url: string("GEOCODER_URL", defaults.geocoder_url),
            geocoder_user_agent: string("GEOCODER_USER_AGENT", defaults.geocoder_user_agent),
            geocoder_timeout,
            geocode_hint: GeocodeHint::new(
                string("GEOCODE_LOCALITY", defaults.geocode_hint.locality),
                string("GEOCODE_COUNTRY", defaults.geocode_hint.country),
            ),
        })
    }

    /// Config for tests: local fixture files, unroutable geocoder.
    pub fn test_default() -> Self {
        Self {
            data_source: "tests/fixtures/nurseries.csv".to_string(),
            boundary_source: "tests/fixtures/khariar_boundary.geojson".to_string(),
            geocoder_url: "http://127.0.0.1:1".to_string(),
            geocoder_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
