//! Orthogonal connection routing and bendpoint reconciliation
//!
//! The [`Router`] takes a connection whose shapes or bendpoints were just
//! edited and brings its route back in line: bendpoints that ended up inside
//! a shape are dropped, boundary anchors snap to the side the route actually
//! leaves from, coincident siblings are fanned out, and collinear bendpoints
//! are collapsed before the result is committed.

pub mod anchors;
pub mod calculator;
pub mod config;
pub mod context;
pub mod direction;
pub mod error;
pub mod normalize;
pub mod self_loop;
pub mod stacking;

pub use calculator::RouteOutcome;
pub use config::RouterConfig;
pub use error::{ConfigError, NonOrthogonal, RouteError};
pub use stacking::stacked_equal;

use crate::model::{
    Bounds, ConnectionId, ConnectionKind, Diagram, Geometry, InterchangeSink, Point, ShapeId,
};

/// How a connection has to be routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Source and target are different shapes
    Regular,
    /// Source and target are the same shape
    SelfLoop(ShapeId),
}

/// Classify a connection by the shapes owning its anchors
pub fn route_kind(diagram: &Diagram, id: ConnectionId) -> Result<RouteKind, RouteError> {
    let connection = diagram
        .connection(id)
        .ok_or(RouteError::UnknownConnection(id))?;
    let source = diagram.anchor_shape(connection.start);
    let target = diagram.anchor_shape(connection.end);
    if source == target {
        Ok(RouteKind::SelfLoop(source))
    } else {
        Ok(RouteKind::Regular)
    }
}

/// Connection router.
///
/// Holds only its configuration; all per-call state lives in a
/// [`context::RoutingContext`], so one router can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route one connection. Returns true if the connection was rewritten.
    pub fn route<S: InterchangeSink>(
        &self,
        diagram: &mut Diagram,
        id: ConnectionId,
        sink: &mut S,
    ) -> Result<bool, RouteError> {
        Ok(self.route_detailed(diagram, id, None, sink)?.changed)
    }

    /// Route one connection, optionally seeding the interior points instead
    /// of starting from the current bendpoints
    pub fn route_detailed<S: InterchangeSink>(
        &self,
        diagram: &mut Diagram,
        id: ConnectionId,
        seed: Option<&[Point]>,
        sink: &mut S,
    ) -> Result<RouteOutcome, RouteError> {
        let connection = diagram
            .connection(id)
            .ok_or(RouteError::UnknownConnection(id))?;
        if connection.kind == ConnectionKind::Straight {
            return Ok(RouteOutcome::default());
        }

        match route_kind(diagram, id)? {
            RouteKind::SelfLoop(shape) => {
                let changed = self_loop::route_self(diagram, id, shape, &self.config, sink)?;
                Ok(RouteOutcome {
                    changed,
                    ..RouteOutcome::default()
                })
            }
            RouteKind::Regular => calculator::route_regular(diagram, id, seed, &self.config, sink),
        }
    }

    /// Route every connection in diagram order; returns the ones that changed
    pub fn route_all<S: InterchangeSink>(
        &self,
        diagram: &mut Diagram,
        sink: &mut S,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let mut changed = Vec::new();
        for id in diagram.connection_ids() {
            if self.route(diagram, id, sink)? {
                changed.push(id);
            }
        }
        Ok(changed)
    }

    /// Move or resize a shape and reroute everything it affects: connections
    /// attached to its anchors and connections whose extent overlaps it
    pub fn reroute_shape<S: InterchangeSink>(
        &self,
        diagram: &mut Diagram,
        shape: ShapeId,
        bounds: Bounds,
        sink: &mut S,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        if !diagram.set_shape_bounds(shape, bounds) {
            return Err(RouteError::UnknownShape(shape));
        }

        let affected: Vec<ConnectionId> = diagram
            .connection_ids()
            .into_iter()
            .filter(|&id| {
                let Some(connection) = diagram.connection(id) else {
                    return false;
                };
                let attached = diagram.anchor_shape(connection.start) == shape
                    || diagram.anchor_shape(connection.end) == shape;
                attached
                    || diagram
                        .connection_points(id)
                        .and_then(|points| Bounds::enclosing(&points))
                        .is_some_and(|extent| diagram.intersects(shape, &extent))
            })
            .collect();
        tracing::debug!(?shape, affected = affected.len(), "rerouting after shape change");

        let mut changed = Vec::new();
        for id in affected {
            if self.route(diagram, id, sink)? {
                changed.push(id);
            }
        }
        Ok(changed)
    }
}
