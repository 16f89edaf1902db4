use std::collections::BTreeMap;

use futures::channel::mpsc::{self, UnboundedSender};
use log::{debug, info, warn};
use wkt::ToWkt;

use crate::config::MapView;
use crate::geo::Coordinate;
use crate::surface::{ClickStream, LayerHandle, MapSurface, MarkerHandle};

/// Feeds clicks into a [`HeadlessSurface`]. Clicks stop once every handle is dropped.
#[derive(Debug, Clone)]
pub struct ClickHandle {
    sender: UnboundedSender<Coordinate>,
}

impl ClickHandle {
    /// Emits a click. Returns `false` if nobody listens anymore.
    pub fn click(&self, at: Coordinate) -> bool {
        self.sender.unbounded_send(at).is_ok()
    }
}

/// A surface without a display. It keeps what would be visible, and logs each command.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    clicks: Option<ClickStream>,
    view: Option<MapView>,
    next_handle: u64,
    markers: BTreeMap<MarkerHandle, Coordinate>,
    layers: BTreeMap<LayerHandle, Vec<Coordinate>>,
    notifications: Vec<String>,
    layers_added: usize,
}

impl HeadlessSurface {
    pub fn new() -> (Self, ClickHandle) {
        let (sender, receiver) = mpsc::unbounded();

        let surface = HeadlessSurface {
            clicks: Some(receiver),
            ..HeadlessSurface::default()
        };

        (surface, ClickHandle { sender })
    }

    pub fn view(&self) -> Option<&MapView> {
        self.view.as_ref()
    }

    /// Marker positions currently on the map, in placement order.
    pub fn markers(&self) -> Vec<Coordinate> {
        self.markers.values().copied().collect()
    }

    /// Polylines currently on the map, oldest first.
    pub fn polylines(&self) -> Vec<&[Coordinate]> {
        self.layers.values().map(Vec::as_slice).collect()
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Number of polylines ever drawn, including removed ones.
    pub fn layers_added(&self) -> usize {
        self.layers_added
    }

    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl MapSurface for HeadlessSurface {
    fn show(&mut self, view: &MapView) {
        info!(
            "Showing {} at zoom {} from {}",
            view.center, view.zoom, view.tile_url
        );
        self.view = Some(view.clone());
    }

    fn subscribe_clicks(&mut self) -> ClickStream {
        self.clicks.take().unwrap_or_else(|| {
            warn!("Clicks already subscribed, handing out a closed stream");
            let (_, receiver) = mpsc::unbounded();
            receiver
        })
    }

    fn place_marker(&mut self, at: Coordinate) -> MarkerHandle {
        let marker = MarkerHandle(self.handle());
        debug!("Marker {} at {at}", marker.0);

        self.markers.insert(marker, at);
        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_none() {
            warn!("Removing unknown marker {}", marker.0);
        }
    }

    fn add_polyline(&mut self, path: &[Coordinate]) -> LayerHandle {
        let layer = LayerHandle(self.handle());
        info!(
            "Layer {}: {}",
            layer.0,
            Coordinate::linestring(path).wkt_string()
        );

        self.layers.insert(layer, path.to_vec());
        self.layers_added += 1;
        layer
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        if self.layers.remove(&layer).is_none() {
            warn!("Removing unknown layer {}", layer.0);
        }
    }

    fn notify(&mut self, message: &str) {
        warn!("{message}");
        self.notifications.push(message.to_string());
    }
}
