use std::fmt;

use crate::geo::GeoError;
use crate::impl_err;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidUrl(String),
    InvalidNumber { key: &'static str, value: String },
    InvalidCenter(GeoError),
}

impl_err!(GeoError, ConfigError, InvalidCenter);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUrl(url) => write!(f, "Invalid backend url: {url}"),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "Expected a number for {key}, given: {value}")
            }
            ConfigError::InvalidCenter(err) => write!(f, "Invalid map centre. {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}
