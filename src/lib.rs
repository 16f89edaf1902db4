#![doc = include_str!("../README.md")]

pub mod client;
pub mod config;
pub mod error;
pub mod geo;
pub mod session;
pub mod surface;
pub mod util;

#[doc(inline)]
pub use client::{HttpBackend, NodeId, NodeResolver, RouteProvider};
#[doc(inline)]
pub use config::{BackendConfig, Config, MapView};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use geo::Coordinate;
#[doc(inline)]
pub use session::MapSession;
#[doc(inline)]
pub use surface::{HeadlessSurface, MapSurface};
