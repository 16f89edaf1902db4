//! Geographic primitives shared by the clients, the surface and the session.

#[doc(hidden)]
pub mod coord;
#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use coord::{Coordinate, Degree};
#[doc(inline)]
pub use error::GeoError;
