//! The map display capability the session draws onto.
//!
//! A surface delivers clicks and accepts markers, polylines and user-facing
//! notifications. Rendering tiles is entirely its own business.

#[doc(hidden)]
pub mod headless;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use headless::{ClickHandle, HeadlessSurface};

use futures::channel::mpsc::UnboundedReceiver;

use crate::config::MapView;
use crate::geo::Coordinate;

/// Stream of clicked coordinates, in the order the user made them.
pub type ClickStream = UnboundedReceiver<Coordinate>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(pub u64);

pub trait MapSurface {
    /// Positions the map and its tile source, before any interaction.
    fn show(&mut self, view: &MapView);

    /// Subscribes to clicks. The stream ends once the surface stops producing them.
    fn subscribe_clicks(&mut self) -> ClickStream;

    fn place_marker(&mut self, at: Coordinate) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Draws a polyline through `path`, in order.
    fn add_polyline(&mut self, path: &[Coordinate]) -> LayerHandle;

    fn remove_layer(&mut self, layer: LayerHandle);

    /// Shows a message to the user. It must not block the event loop.
    fn notify(&mut self, message: &str);
}
