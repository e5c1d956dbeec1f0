//! Diagram-interchange synchronization
//!
//! After the router commits a new route it tells the interchange layer so the
//! persisted visual edge matches the connection.

use std::collections::BTreeMap;

use serde::Serialize;

use super::diagram::ConnectionId;
use super::types::Point;

/// Receiver of "synchronize this connection's visual edge" notifications
pub trait InterchangeSink {
    fn sync_edge(&mut self, id: ConnectionId, name: &str, waypoints: &[Point]);
}

/// Sink that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl InterchangeSink for NullSink {
    fn sync_edge(&mut self, _id: ConnectionId, _name: &str, _waypoints: &[Point]) {}
}

/// Persisted waypoints of one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterchangeEdge {
    pub connection: String,
    pub waypoints: Vec<Point>,
}

/// In-memory interchange store keeping the latest edge of every connection
#[derive(Debug, Default, Clone)]
pub struct DiagramInterchange {
    edges: BTreeMap<ConnectionId, InterchangeEdge>,
    syncs: usize,
}

impl DiagramInterchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(&self, id: ConnectionId) -> Option<&InterchangeEdge> {
        self.edges.get(&id)
    }

    /// Edges in connection order
    pub fn edges(&self) -> impl Iterator<Item = &InterchangeEdge> {
        self.edges.values()
    }

    /// Number of notifications received so far
    pub fn sync_count(&self) -> usize {
        self.syncs
    }
}

impl InterchangeSink for DiagramInterchange {
    fn sync_edge(&mut self, id: ConnectionId, name: &str, waypoints: &[Point]) {
        tracing::trace!(connection = name, waypoints = waypoints.len(), "sync DI edge");
        self.syncs += 1;
        self.edges.insert(
            id,
            InterchangeEdge {
                connection: name.to_string(),
                waypoints: waypoints.to_vec(),
            },
        );
    }
}
