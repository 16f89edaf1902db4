use std::fmt;

use crate::client::{ResolutionError, RoutingError, TransportError};
use crate::config::ConfigError;
use crate::geo::GeoError;
use crate::impl_err;

#[derive(Debug)]
pub enum Error {
    Geo(GeoError),
    Config(ConfigError),
    Transport(TransportError),
    Resolution(ResolutionError),
    Routing(RoutingError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(GeoError, Geo);
impl_err!(ConfigError, Config);
impl_err!(TransportError, Transport);
impl_err!(ResolutionError, Resolution);
impl_err!(RoutingError, Routing);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Geo(err) => write!(f, "{err}"),
            Error::Config(err) => write!(f, "{err}"),
            Error::Transport(err) => write!(f, "{err}"),
            Error::Resolution(err) => write!(f, "{err}"),
            Error::Routing(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}
