use std::future::Future;

use log::{debug, warn};

use crate::client::error::RoutingError;
use crate::client::wire::{NodeId, RouteRequest, RouteResponse};
use crate::client::{HttpBackend, ROUTE_PATH};
use crate::geo::Coordinate;

/// Computes a path between two vertices of the routing graph.
pub trait RouteProvider {
    /// Returns the path from `origin` to `destination` as ordered
    /// (latitude, longitude) coordinates. The path is never empty.
    fn compute_route(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> impl Future<Output = Result<Vec<Coordinate>, RoutingError>>;
}

impl RouteProvider for HttpBackend {
    async fn compute_route(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<Coordinate>, RoutingError> {
        let request = RouteRequest {
            origen: origin,
            destino: destination,
        };

        let response: RouteResponse = self.post(ROUTE_PATH, &request).await?;
        let path = response
            .into_path()
            .inspect_err(|err| warn!("Route {} -> {}: {err}", request.origen, request.destino))?;

        debug!(
            "Route {} -> {} has {} vertices",
            request.origen,
            request.destino,
            path.len()
        );

        Ok(path)
    }
}
