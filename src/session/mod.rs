//! The map session: accumulates clicks into a two-point selection, resolves
//! each click to a graph node and, once both are known, requests and draws
//! the route between them.
//!
//! All work happens on one task. Backend calls are kept in flight alongside
//! the click stream and are matched back to their click (or selection cycle)
//! when they complete, in whatever order that happens.

#[doc(hidden)]
pub mod render;
#[doc(hidden)]
pub mod selection;

#[doc(inline)]
pub use render::RouteRenderer;
#[doc(inline)]
pub use selection::{Cycle, PendingPoint, Resolution, RoutePair, Selection, SelectionState, Ticket};

use std::sync::Arc;

use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};

use crate::client::{NodeId, NodeResolver, ResolutionError, RouteProvider, RoutingError};
use crate::config::MapView;
use crate::geo::Coordinate;
use crate::surface::{MapSurface, MarkerHandle};

/// A backend call which finished, tagged with what it was issued for.
pub enum Completion {
    Resolved {
        ticket: Ticket,
        result: Result<NodeId, ResolutionError>,
    },
    Routed {
        cycle: Cycle,
        result: Result<Vec<Coordinate>, RoutingError>,
    },
}

/// Long-lived owner of everything one map needs: the surface, the
/// selection, the markers placed for it and the displayed route.
pub struct MapSession<S, R, P> {
    surface: S,
    resolver: Arc<R>,
    router: Arc<P>,
    selection: Selection,
    renderer: RouteRenderer,
    markers: Vec<(Ticket, MarkerHandle)>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    routes_requested: usize,
}

impl<S, R, P> MapSession<S, R, P>
where
    S: MapSurface,
    R: NodeResolver + 'static,
    P: RouteProvider + 'static,
{
    /// Creates the session and shows `view` on the surface.
    pub fn open(mut surface: S, resolver: Arc<R>, router: Arc<P>, view: &MapView) -> Self {
        surface.show(view);

        MapSession {
            surface,
            resolver,
            router,
            selection: Selection::new(),
            renderer: RouteRenderer::new(),
            markers: Vec::with_capacity(selection::CAPACITY),
            in_flight: FuturesUnordered::new(),
            routes_requested: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn renderer(&self) -> &RouteRenderer {
        &self.renderer
    }

    /// Number of route requests issued so far.
    pub fn routes_requested(&self) -> usize {
        self.routes_requested
    }

    /// Number of backend calls still awaiting completion.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Handles a click at `at`. The marker is placed straight away, the
    /// nearest-node lookup is left in flight.
    ///
    /// Points whose resolution failed give up their slot to this click. A
    /// click on a full selection starts a new one, removing the previous
    /// markers and route first.
    pub fn on_click(&mut self, at: Coordinate) {
        if self.selection.has_failed() {
            self.discard_failed();
        }

        if self.selection.is_full() {
            self.begin_cycle();
        }

        let Some(ticket) = self.selection.push(at) else {
            warn!("Selection is still full, ignoring click at {at}");
            return;
        };

        let marker = self.surface.place_marker(at);
        self.markers.push((ticket, marker));
        debug!("Click {} at {at}, resolving nearest node", ticket.0);

        let resolver = Arc::clone(&self.resolver);
        self.in_flight.push(
            async move {
                let result = resolver.resolve_nearest(at).await;
                Completion::Resolved { ticket, result }
            }
            .boxed_local(),
        );
    }

    /// Applies a finished backend call.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Resolved { ticket, result } => self.on_node_resolved(ticket, result),
            Completion::Routed { cycle, result } => self.on_route(cycle, result),
        }
    }

    /// Awaits the next in-flight call and applies it. Returns `false` if none was pending.
    pub async fn settle_next(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(completion) => {
                self.complete(completion);
                true
            }
            None => false,
        }
    }

    /// Applies every in-flight call, including those issued while settling.
    pub async fn settle(&mut self) {
        while self.settle_next().await {}
    }

    /// Runs the session over the surface's clicks. Returns once the click
    /// stream has ended and no backend call is left in flight.
    pub async fn run(&mut self) {
        let mut clicks = self.surface.subscribe_clicks();
        let mut listening = true;

        loop {
            tokio::select! {
                click = clicks.next(), if listening => match click {
                    Some(at) => self.on_click(at),
                    None => {
                        debug!("Click stream closed, draining {} calls", self.in_flight.len());
                        listening = false;
                    }
                },
                Some(completion) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.complete(completion);
                },
                else => break,
            }
        }

        info!(
            "Session finished after {} route requests",
            self.routes_requested
        );
    }

    fn begin_cycle(&mut self) {
        let dropped = self.selection.reset();
        debug!(
            "Starting cycle {}, dropping {} points",
            self.selection.cycle().0,
            dropped.len()
        );

        for (_, marker) in self.markers.drain(..) {
            self.surface.remove_marker(marker);
        }

        self.renderer.clear(&mut self.surface);
    }

    fn discard_failed(&mut self) {
        for point in self.selection.discard_failed() {
            debug!("Dropping unresolved point {}", point.coordinate);

            if let Some(index) = self.markers.iter().position(|(t, _)| *t == point.ticket) {
                let (_, marker) = self.markers.remove(index);
                self.surface.remove_marker(marker);
            }
        }
    }

    fn on_node_resolved(&mut self, ticket: Ticket, result: Result<NodeId, ResolutionError>) {
        match result {
            Ok(node) => {
                let pair = self.selection.resolve(ticket, node);
                debug!("Selection is {}", self.selection.state());

                if let Some(pair) = pair {
                    self.request_route(pair);
                }
            }
            Err(err) => {
                // Results of a dropped selection are of no interest to the user
                if let Some(point) = self.selection.fail(ticket) {
                    warn!("Point {} stays unresolved. {err}", point.coordinate);
                    self.surface.notify(&err.to_string());
                }
            }
        }
    }

    fn request_route(&mut self, pair: RoutePair) {
        let RoutePair {
            cycle,
            origin,
            destination,
        } = pair;

        info!("Requesting route {origin} -> {destination}");
        self.routes_requested += 1;

        let router = Arc::clone(&self.router);
        self.in_flight.push(
            async move {
                let result = router.compute_route(origin, destination).await;
                Completion::Routed { cycle, result }
            }
            .boxed_local(),
        );
    }

    fn on_route(&mut self, cycle: Cycle, result: Result<Vec<Coordinate>, RoutingError>) {
        if cycle != self.selection.cycle() {
            debug!("Discarding route of superseded cycle {}", cycle.0);
            return;
        }

        match result {
            Ok(path) => {
                self.renderer.render(&mut self.surface, &path);
            }
            Err(err) => self.renderer.render_error(&mut self.surface, &err.to_string()),
        }
    }
}
