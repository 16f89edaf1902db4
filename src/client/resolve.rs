use std::future::Future;

use log::{debug, warn};

use crate::client::error::ResolutionError;
use crate::client::wire::{NearestNodeRequest, NearestNodeResponse, NodeId};
use crate::client::{HttpBackend, NEAREST_NODE_PATH};
use crate::geo::Coordinate;

/// Maps a free coordinate onto the closest vertex of the routing graph.
pub trait NodeResolver {
    /// Resolves the nearest node to `coordinate`. Callers keep `coordinate`
    /// (or a ticket for it) alongside the returned future, the result carries
    /// no reference back to the request.
    fn resolve_nearest(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<NodeId, ResolutionError>>;
}

impl NodeResolver for HttpBackend {
    async fn resolve_nearest(&self, coordinate: Coordinate) -> Result<NodeId, ResolutionError> {
        let request = NearestNodeRequest::from(coordinate);
        let response: NearestNodeResponse = self
            .post(NEAREST_NODE_PATH, &request)
            .await
            .inspect_err(|err| warn!("Nearest node lookup for {coordinate} failed. {err}"))?;

        let node = response.nodo.ok_or(ResolutionError::MissingNode)?;
        debug!("Resolved {coordinate} to node {node}");

        Ok(node)
    }
}
