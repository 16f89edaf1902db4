use log::debug;

use crate::geo::Coordinate;
use crate::surface::{LayerHandle, MapSurface};

/// Owns the single route layer of a surface.
///
/// At most one route is visible at any time: the previous layer is
/// removed before the next one is drawn.
#[derive(Debug, Default)]
pub struct RouteRenderer {
    current: Option<LayerHandle>,
}

impl RouteRenderer {
    pub fn new() -> Self {
        RouteRenderer::default()
    }

    pub fn current(&self) -> Option<LayerHandle> {
        self.current
    }

    pub fn render<S: MapSurface>(&mut self, surface: &mut S, path: &[Coordinate]) -> LayerHandle {
        self.clear(surface);

        let layer = surface.add_polyline(path);
        debug!("Route layer is now {}", layer.0);

        self.current = Some(layer);
        layer
    }

    /// Reports a failure. The displayed route is left as it is.
    pub fn render_error<S: MapSurface>(&self, surface: &mut S, message: &str) {
        surface.notify(message);
    }

    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        if let Some(layer) = self.current.take() {
            surface.remove_layer(layer);
        }
    }
}
