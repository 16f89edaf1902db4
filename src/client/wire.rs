//! Request and response bodies of the two backend endpoints.
//!
//! Field names are the backend's own and must not change:
//! `POST /nodo_mas_cercano` takes `{"x": lng, "y": lat}` and answers `{"nodo": id}`,
//! `POST /ruta` takes `{"origen": id, "destino": id}` and answers
//! `{"ruta": [[lng, lat], ...]}` or `{"error": message}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::client::error::RoutingError;
use crate::geo::{Coordinate, Degree};

/// Identifies a vertex of the backend's routing graph. It has no meaning
/// outside of that graph, and is echoed back to the backend verbatim:
/// numeric ids keep their JSON form, whether integers beyond `i64` or floats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Numeric(Number),
    Named(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Numeric(id) => write!(f, "{id}"),
            NodeId::Named(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Numeric(Number::from(value))
    }
}

impl From<Number> for NodeId {
    fn from(value: Number) -> Self {
        NodeId::Numeric(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Named(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestNodeRequest {
    pub x: Degree,
    pub y: Degree,
}

impl From<Coordinate> for NearestNodeRequest {
    fn from(value: Coordinate) -> Self {
        NearestNodeRequest {
            x: value.lng(),
            y: value.lat(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestNodeResponse {
    #[serde(default)]
    pub nodo: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origen: NodeId,
    pub destino: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruta: Option<Vec<[Degree; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteResponse {
    /// Interprets the response. A present `ruta` wins over anything else in the body,
    /// its `[lng, lat]` vertices are swapped into [`Coordinate`]s here.
    pub fn into_path(self) -> Result<Vec<Coordinate>, RoutingError> {
        match self {
            RouteResponse {
                ruta: Some(ruta), ..
            } => {
                if ruta.is_empty() {
                    return Err(RoutingError::EmptyRoute);
                }

                ruta.into_iter()
                    .map(|vertex| Coordinate::from_lng_lat(vertex).map_err(RoutingError::from))
                    .collect()
            }
            RouteResponse {
                error: Some(message),
                ..
            } => Err(RoutingError::Backend(message)),
            RouteResponse { .. } => Err(RoutingError::Backend(
                "Response carries neither a route nor an error".to_string(),
            )),
        }
    }
}
