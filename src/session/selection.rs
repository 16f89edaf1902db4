use log::debug;
use strum::Display;

use crate::client::NodeId;
use crate::geo::Coordinate;

/// Points a selection holds before a route is requested.
pub const CAPACITY: usize = 2;

/// Identifies one click for the session's whole life. Resolutions are
/// matched back to their point through it, never through arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// Counts the selections made so far. A route result belongs to the cycle
/// whose pair requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cycle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Pending,
    Resolved(NodeId),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingPoint {
    pub ticket: Ticket,
    pub coordinate: Coordinate,
    pub resolution: Resolution,
}

impl PendingPoint {
    pub fn node(&self) -> Option<&NodeId> {
        match &self.resolution {
            Resolution::Resolved(node) => Some(node),
            _ => None,
        }
    }
}

/// Both ends of a route, in click order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePair {
    pub cycle: Cycle,
    pub origin: NodeId,
    pub destination: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SelectionState {
    Empty,
    OneResolved,
    /// Both points resolved, the route has been requested.
    Requesting,
    /// Points are waiting on resolution, or one failed and the pair cannot complete.
    Incomplete,
}

/// The ordered, click-derived points of the current two-point selection.
#[derive(Debug, Default)]
pub struct Selection {
    points: Vec<PendingPoint>,
    next_ticket: u64,
    cycle: u64,
    requested: bool,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn points(&self) -> &[PendingPoint] {
        &self.points
    }

    pub fn cycle(&self) -> Cycle {
        Cycle(self.cycle)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True once the selection holds [`CAPACITY`] points. The next
    /// click must [`reset`](Selection::reset) it.
    pub fn is_full(&self) -> bool {
        self.points.len() >= CAPACITY
    }

    pub fn resolved(&self) -> usize {
        self.points.iter().filter(|p| p.node().is_some()).count()
    }

    pub fn state(&self) -> SelectionState {
        match (self.points.len(), self.resolved()) {
            (0, _) => SelectionState::Empty,
            _ if self.requested => SelectionState::Requesting,
            (1, 1) => SelectionState::OneResolved,
            _ => SelectionState::Incomplete,
        }
    }

    /// Appends a point for `coordinate`, awaiting resolution. Returns `None`,
    /// leaving the selection untouched, if it is already full.
    pub fn push(&mut self, coordinate: Coordinate) -> Option<Ticket> {
        if self.is_full() {
            return None;
        }

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);

        self.points.push(PendingPoint {
            ticket,
            coordinate,
            resolution: Resolution::Pending,
        });

        Some(ticket)
    }

    pub fn has_failed(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.resolution == Resolution::Failed)
    }

    /// Removes the points whose resolution failed, so that their slots can be
    /// taken by the next clicks. Points still pending or resolved are kept.
    pub fn discard_failed(&mut self) -> Vec<PendingPoint> {
        let (failed, kept) = std::mem::take(&mut self.points)
            .into_iter()
            .partition(|p| p.resolution == Resolution::Failed);

        self.points = kept;
        failed
    }

    /// Records the node `ticket` resolved to. Returns the pair to route
    /// once both points are resolved, and only that once per cycle.
    ///
    /// Tickets dropped by a [`reset`](Selection::reset) are ignored.
    pub fn resolve(&mut self, ticket: Ticket, node: NodeId) -> Option<RoutePair> {
        let Some(point) = self.points.iter_mut().find(|p| p.ticket == ticket) else {
            debug!("Ignoring resolution of stale ticket {}", ticket.0);
            return None;
        };

        point.resolution = Resolution::Resolved(node);

        if self.requested || self.resolved() != CAPACITY {
            return None;
        }

        self.requested = true;

        let mut nodes = self.points.iter().filter_map(PendingPoint::node).cloned();
        let origin = nodes.next()?;
        let destination = nodes.next()?;

        Some(RoutePair {
            cycle: self.cycle(),
            origin,
            destination,
        })
    }

    /// Marks `ticket` as failed. No route is requested while the point
    /// holds its slot, see [`discard_failed`](Selection::discard_failed).
    pub fn fail(&mut self, ticket: Ticket) -> Option<&PendingPoint> {
        let point = self.points.iter_mut().find(|p| p.ticket == ticket)?;
        point.resolution = Resolution::Failed;
        Some(point)
    }

    /// Drops every point and starts a new cycle. Returns the dropped points.
    pub fn reset(&mut self) -> Vec<PendingPoint> {
        self.cycle += 1;
        self.requested = false;
        std::mem::take(&mut self.points)
    }
}
