//! Routing for connections that start and end on the same shape

use crate::model::{ConnectionId, Diagram, Edge, Geometry, InterchangeSink, Point, ShapeId};

use super::config::RouterConfig;
use super::context::RoutingContext;
use super::error::RouteError;
use super::normalize::commit;

/// The three bendpoints of a loop around a shape's top-right corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPoints {
    pub right: Point,
    pub corner: Point,
    pub top: Point,
}

/// Compute the loop around the top-right corner of `shape`.
///
/// A hint point beyond the right side or above the top (by more than the
/// hint tolerance) stretches the loop through it.
pub fn loop_points<G: Geometry>(
    geometry: &G,
    shape: ShapeId,
    hint: Option<Point>,
    config: &RouterConfig,
) -> LoopPoints {
    let bounds = geometry.shape_bounds(shape);
    let x1 = bounds.right().saturating_add(config.loop_clearance);
    let y1 = bounds.mid_y();
    let x2 = bounds.mid_x();
    let y2 = bounds.y.saturating_sub(config.loop_clearance);
    let mut points = LoopPoints {
        right: Point::new(x1, y1),
        corner: Point::new(x1, y2),
        top: Point::new(x2, y2),
    };

    if let Some(p) = hint {
        if p.x > bounds.right().saturating_add(config.hint_tolerance) {
            points.right.x = p.x;
            points.corner.x = p.x;
        }
        if p.y < bounds.y.saturating_sub(config.hint_tolerance) {
            points.top.y = p.y;
            points.corner.y = p.y;
        }
    }
    points
}

/// Route a self-connection of `shape`.
///
/// A loop that already has bendpoints and distinct anchors is assumed to be
/// shaped by the user and is kept, unless a hint is present or the
/// connection asks to be forced.
pub fn route_self<S: InterchangeSink>(
    diagram: &mut Diagram,
    id: ConnectionId,
    shape: ShapeId,
    config: &RouterConfig,
    sink: &mut S,
) -> Result<bool, RouteError> {
    let connection = diagram
        .connection(id)
        .ok_or(RouteError::UnknownConnection(id))?;
    let hint = connection.hint_point();
    let manually_shaped = connection.start != connection.end && !connection.bendpoints.is_empty();
    if hint.is_none() && manually_shaped && !connection.force_routing {
        tracing::debug!(connection = %connection.name, "keeping user-shaped self loop");
        return Ok(false);
    }

    let mut ctx = RoutingContext::snapshot(
        &*diagram,
        connection.start,
        connection.end,
        &connection.bendpoints,
    );
    let start = diagram.boundary_anchor(shape, Edge::Right);
    let end = diagram.boundary_anchor(shape, Edge::Top);
    let LoopPoints { right, corner, top } = loop_points(&*diagram, shape, hint, config);
    ctx.reset_points(&*diagram, start, end, &[right, corner, top]);

    if !ctx.points_changed() {
        return Ok(false);
    }
    commit(diagram, id, &ctx, sink)?;
    Ok(true)
}
