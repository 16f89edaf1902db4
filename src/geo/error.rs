use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    InvalidCoordinate(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidCoordinate(reason) => write!(f, "Invalid coordinate: {reason}"),
        }
    }
}

impl std::error::Error for GeoError {}
