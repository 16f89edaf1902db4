use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

use crate::geo::GeoError;
use crate::impl_err;

/// A failure to reach the backend, or to read what it answered.
#[derive(Debug)]
pub enum TransportError {
    Http(reqwest::Error),
    Timeout(Duration),
    Endpoint(String),
    Decode {
        status: StatusCode,
        source: serde_json::Error,
    },
}

/// Nearest-node lookup failed. The point it was issued for stays unresolved.
#[derive(Debug)]
pub enum ResolutionError {
    Transport(TransportError),
    MissingNode,
}

/// The backend could not produce a usable route between two nodes.
#[derive(Debug)]
pub enum RoutingError {
    Transport(TransportError),
    /// Message reported by the backend in its `error` field.
    Backend(String),
    EmptyRoute,
    InvalidVertex(GeoError),
}

impl_err!(TransportError, ResolutionError, Transport);
impl_err!(TransportError, RoutingError, Transport);
impl_err!(GeoError, RoutingError, InvalidVertex);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(err) => write!(f, "Request failed: {err}"),
            TransportError::Timeout(after) => {
                write!(f, "Request timed out after {}ms", after.as_millis())
            }
            TransportError::Endpoint(path) => write!(f, "Cannot build endpoint url for {path}"),
            TransportError::Decode { status, source } => {
                write!(f, "Unreadable response (status {status}): {source}")
            }
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::Transport(err) => write!(f, "Could not find nearest node. {err}"),
            ResolutionError::MissingNode => {
                write!(f, "Could not find nearest node. Response has no node")
            }
        }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::Transport(err) => write!(f, "Could not compute route. {err}"),
            RoutingError::Backend(message) => write!(f, "Could not compute route: {message}"),
            RoutingError::EmptyRoute => write!(f, "Could not compute route: path is empty"),
            RoutingError::InvalidVertex(err) => write!(f, "Could not compute route. {err}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(err) => Some(err),
            TransportError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for ResolutionError {}
impl std::error::Error for RoutingError {}
