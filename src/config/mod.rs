//! Runtime configuration, resolved from the environment.
//!
//! An example environment is shown:
//! ```bash
//! ROUTEPICK_BACKEND_URL=http://127.0.0.1:8080/
//! ROUTEPICK_TIMEOUT_MS=10000
//! ROUTEPICK_CENTER_LAT=39.5
//! ROUTEPICK_CENTER_LNG=-0.4
//! ROUTEPICK_ZOOM=10
//! ROUTEPICK_TILE_URL=https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png
//! ```
//!
//! Unset keys fall back to their defaults. Values which are set but
//! cannot be parsed are reported as a [`ConfigError`].

#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use error::ConfigError;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::geo::Coordinate;

pub const BACKEND_URL: &str = "ROUTEPICK_BACKEND_URL";
pub const TIMEOUT_MS: &str = "ROUTEPICK_TIMEOUT_MS";
pub const CENTER_LAT: &str = "ROUTEPICK_CENTER_LAT";
pub const CENTER_LNG: &str = "ROUTEPICK_CENTER_LNG";
pub const ZOOM: &str = "ROUTEPICK_ZOOM";
pub const TILE_URL: &str = "ROUTEPICK_TILE_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Where the nearest-node and route endpoints live, and how long to wait on them.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Parses the base url. A path without a trailing slash gets one, so
    /// that the endpoint paths are joined beneath it rather than replacing
    /// its last segment.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| ConfigError::InvalidUrl(base_url.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(base_url.to_string()));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(BackendConfig { base_url, timeout })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The view a surface opens on before any click arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_url: String,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            center: Coordinate::new(39.5, -0.4).expect("default centre is valid"),
            zoom: 10,
            tile_url: DEFAULT_TILE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub backend: BackendConfig,
    pub view: MapView,
}

impl Config {
    /// Resolves the configuration from the process environment.
    /// Call `dotenv()` beforehand to include a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MapView::default();

        // A zero timeout would fail every request before it is sent
        let timeout = match parse::<u64, _>(&lookup, TIMEOUT_MS)? {
            Some(0) => {
                return Err(ConfigError::InvalidNumber {
                    key: TIMEOUT_MS,
                    value: lookup(TIMEOUT_MS).unwrap_or_default(),
                })
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_TIMEOUT,
        };

        let backend = match lookup(BACKEND_URL) {
            Some(url) => BackendConfig::new(&url, timeout)?,
            None => BackendConfig {
                timeout,
                ..BackendConfig::default()
            },
        };

        let lat = parse::<f64, _>(&lookup, CENTER_LAT)?.unwrap_or(defaults.center.lat());
        let lng = parse::<f64, _>(&lookup, CENTER_LNG)?.unwrap_or(defaults.center.lng());

        let view = MapView {
            center: Coordinate::new(lat, lng)?,
            zoom: parse::<u8, _>(&lookup, ZOOM)?.unwrap_or(defaults.zoom),
            tile_url: lookup(TILE_URL).unwrap_or(defaults.tile_url),
        };

        Ok(Config { backend, view })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { key, value })
        })
        .transpose()
}
