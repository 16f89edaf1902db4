use crate::config::MapView;
use crate::geo::Coordinate;
use crate::surface::{HeadlessSurface, MapSurface};

use futures::StreamExt;

fn at(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

#[test_log::test]
fn tracks_visible_markers_and_layers() {
    let (mut surface, _clicks) = HeadlessSurface::new();
    surface.show(&MapView::default());
    assert_eq!(surface.view(), Some(&MapView::default()));

    let first = surface.place_marker(at(39.5, -0.4));
    let second = surface.place_marker(at(39.48, -0.38));
    assert_ne!(first, second);
    assert_eq!(surface.markers(), vec![at(39.5, -0.4), at(39.48, -0.38)]);

    surface.remove_marker(first);
    assert_eq!(surface.markers(), vec![at(39.48, -0.38)]);

    let layer = surface.add_polyline(&[at(39.5, -0.4), at(39.48, -0.38)]);
    assert_eq!(surface.polylines().len(), 1);

    surface.remove_layer(layer);
    assert!(surface.polylines().is_empty());
    assert_eq!(surface.layers_added(), 1);

    surface.notify("Could not compute route: no path");
    assert_eq!(surface.notifications(), ["Could not compute route: no path"]);
}

#[tokio::test]
async fn click_stream_ends_with_its_handles() {
    let (mut surface, clicks) = HeadlessSurface::new();
    let mut stream = surface.subscribe_clicks();

    assert!(clicks.click(at(39.5, -0.4)));
    drop(clicks);

    assert_eq!(stream.next().await, Some(at(39.5, -0.4)));
    assert_eq!(stream.next().await, None);

    // A second subscription has nothing left to deliver
    let mut again = surface.subscribe_clicks();
    assert_eq!(again.next().await, None);
}
