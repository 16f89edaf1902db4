//! Runs the HTTP clients, and a full session, against an in-process mock
//! of the routing backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use routepick::client::{ResolutionError, RoutingError, TransportError};
use routepick::{
    BackendConfig, Coordinate, HeadlessSurface, HttpBackend, MapSession, MapView, NodeId,
    NodeResolver, RouteProvider,
};

#[derive(Clone, Default)]
struct Backend {
    /// `(lng, lat, node)` the nearest-node endpoint knows about.
    nodes: Vec<(f64, f64, Value)>,
    /// `(origin, destination, ruta)` the route endpoint answers.
    routes: Vec<(Value, Value, Value)>,
    delay: Duration,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Backend {
    fn node(mut self, lat: f64, lng: f64, node: Value) -> Self {
        self.nodes.push((lng, lat, node));
        self
    }

    fn route(mut self, origin: Value, destination: Value, ruta: Value) -> Self {
        self.routes.push((origin, destination, ruta));
        self
    }

    fn requests(&self, endpoint: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path == endpoint)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn nearest(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend
        .requests
        .lock()
        .unwrap()
        .push(("nodo_mas_cercano".to_string(), body.clone()));
    tokio::time::sleep(backend.delay).await;

    let x = body["x"].as_f64().unwrap_or(f64::NAN);
    let y = body["y"].as_f64().unwrap_or(f64::NAN);

    let node = backend
        .nodes
        .iter()
        .find(|(lng, lat, _)| (lng - x).abs() < 1e-9 && (lat - y).abs() < 1e-9)
        .map(|(_, _, node)| node.clone())
        .unwrap_or(Value::Null);

    Json(json!({ "nodo": node }))
}

async fn route(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push(("ruta".to_string(), body.clone()));

    let found = backend
        .routes
        .iter()
        .find(|(origin, destination, _)| body["origen"] == *origin && body["destino"] == *destination);

    match found {
        Some((_, _, ruta)) => Json(json!({ "ruta": ruta })).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("No path between {} and {}", body["origen"], body["destino"]) })),
        )
            .into_response(),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend stopped");
    });

    addr
}

async fn mock(backend: Backend) -> HttpBackend {
    let app = Router::new()
        .route("/nodo_mas_cercano", post(nearest))
        .route("/ruta", post(route))
        .with_state(backend);

    let addr = serve(app).await;
    client(&format!("http://{addr}"), Duration::from_secs(5))
}

fn client(url: &str, timeout: Duration) -> HttpBackend {
    let config = BackendConfig::new(url, timeout).expect("valid url");
    HttpBackend::new(&config).expect("client must build")
}

fn at(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

#[test_log::test(tokio::test)]
async fn two_clicks_render_the_backend_route() {
    let backend = Backend::default()
        .node(39.5, -0.4, json!(94615698))
        .node(39.48, -0.38, json!(420055138))
        .route(
            json!(94615698),
            json!(420055138),
            json!([[-0.4, 39.5], [-0.38, 39.48]]),
        );

    let http = Arc::new(mock(backend.clone()).await);
    let (surface, clicks) = HeadlessSurface::new();
    let mut session = MapSession::open(surface, Arc::clone(&http), http, &MapView::default());

    clicks.click(at(39.5, -0.4));
    clicks.click(at(39.48, -0.38));
    drop(clicks);

    session.run().await;

    // Lookups run concurrently, so they may reach the backend in either order
    let lookups = backend.requests("nodo_mas_cercano");
    assert_eq!(lookups.len(), 2);
    assert!(lookups.contains(&json!({ "x": -0.4, "y": 39.5 })));
    assert!(lookups.contains(&json!({ "x": -0.38, "y": 39.48 })));
    assert_eq!(
        backend.requests("ruta"),
        vec![json!({ "origen": 94615698, "destino": 420055138 })]
    );

    let surface = session.into_surface();
    assert_eq!(surface.polylines(), vec![&[at(39.5, -0.4), at(39.48, -0.38)][..]]);
    assert_eq!(surface.markers(), vec![at(39.5, -0.4), at(39.48, -0.38)]);
    assert!(surface.notifications().is_empty());
}

#[test_log::test(tokio::test)]
async fn route_vertices_arrive_as_lat_lng() {
    let backend = Backend::default().route(
        json!(1),
        json!(2),
        json!([[-0.4, 39.5], [-0.41, 39.49]]),
    );
    let http = mock(backend).await;

    let path = http
        .compute_route(NodeId::from(1), NodeId::from(2))
        .await
        .expect("route must be computed");

    assert_eq!(path, vec![at(39.5, -0.4), at(39.49, -0.41)]);
    assert_eq!(path[0].lat(), 39.5);
    assert_eq!(path[0].lng(), -0.4);
}

#[test_log::test(tokio::test)]
async fn backend_error_is_reported_verbatim() {
    let http = mock(Backend::default()).await;

    let err = http
        .compute_route(NodeId::from(1), NodeId::from("n-2"))
        .await
        .expect_err("no route is known");

    match err {
        RoutingError::Backend(message) => assert_eq!(message, "No path between 1 and \"n-2\""),
        other => panic!("Expected a backend error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn node_ids_are_echoed_verbatim() {
    let backend = Backend::default().node(39.5, -0.4, json!("osm-7"));
    let http = mock(backend).await;

    let node = http.resolve_nearest(at(39.5, -0.4)).await.expect("known node");
    assert_eq!(node, NodeId::from("osm-7"));

    let missing = http.resolve_nearest(at(10.0, 10.0)).await;
    assert!(matches!(missing, Err(ResolutionError::MissingNode)));
}

#[test_log::test(tokio::test)]
async fn unreadable_body_is_a_transport_error() {
    let app = Router::new().route("/nodo_mas_cercano", post(|| async { "<html>oops</html>" }));
    let addr = serve(app).await;
    let http = client(&format!("http://{addr}"), Duration::from_secs(5));

    let err = http.resolve_nearest(at(39.5, -0.4)).await.expect_err("not json");
    assert!(matches!(
        err,
        ResolutionError::Transport(TransportError::Decode { status, .. }) if status == StatusCode::OK
    ));
}

#[test_log::test(tokio::test)]
async fn slow_backend_times_out() {
    let backend = Backend {
        delay: Duration::from_millis(500),
        ..Backend::default()
    }
    .node(39.5, -0.4, json!(1));
    let app = Router::new()
        .route("/nodo_mas_cercano", post(nearest))
        .with_state(backend);
    let addr = serve(app).await;
    let http = client(&format!("http://{addr}"), Duration::from_millis(50));

    let err = http.resolve_nearest(at(39.5, -0.4)).await.expect_err("must time out");
    assert!(matches!(
        err,
        ResolutionError::Transport(TransportError::Timeout(after)) if after == Duration::from_millis(50)
    ));
}

#[test_log::test(tokio::test)]
async fn unreachable_backend_is_not_fatal() {
    // Reserve a port, then release it so that nothing listens there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = Arc::new(client(&format!("http://{addr}"), Duration::from_secs(1)));
    let (surface, clicks) = HeadlessSurface::new();
    let mut session = MapSession::open(surface, Arc::clone(&http), http, &MapView::default());

    clicks.click(at(39.5, -0.4));
    clicks.click(at(39.48, -0.38));
    drop(clicks);

    session.run().await;

    assert_eq!(session.routes_requested(), 0);
    assert_eq!(session.surface().notifications().len(), 2);
    assert_eq!(session.surface().markers().len(), 2);
    assert!(session.surface().polylines().is_empty());
}
