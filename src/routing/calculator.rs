//! Route calculation for connections between two shapes

use crate::model::{ConnectionId, Diagram, Geometry, InterchangeSink, Point};

use super::anchors::resolve_anchors;
use super::config::RouterConfig;
use super::context::RoutingContext;
use super::error::RouteError;
use super::normalize::commit;
use super::stacking::separate_if_stacked;

/// What a routing call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteOutcome {
    /// The connection was rewritten
    pub changed: bool,
    /// Route-calculation passes issued (zero when the general pipeline was
    /// bypassed)
    pub passes: usize,
    /// Jog applied to separate the route from coincident siblings
    pub stack_offset: Option<i32>,
}

/// Remove interior points that fall inside the source or target shape.
///
/// Returns true if anything was removed.
pub fn remove_contained_points<G: Geometry>(geometry: &G, ctx: &mut RoutingContext) -> bool {
    let len = ctx.new_points.len();
    if len <= 2 {
        return false;
    }
    let (source, target) = (ctx.source, ctx.target);
    let first = ctx.new_points[0];
    let last = ctx.new_points[len - 1];
    let interior: Vec<Point> = ctx.new_points[1..len - 1]
        .iter()
        .copied()
        .filter(|p| !geometry.contains(source, *p) && !geometry.contains(target, *p))
        .collect();
    if interior.len() == len - 2 {
        return false;
    }
    tracing::trace!(removed = len - 2 - interior.len(), "dropped bendpoints inside shapes");

    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(first);
    points.extend(interior);
    points.push(last);
    ctx.new_points = points;
    true
}

/// Route a connection between two distinct shapes.
///
/// Route calculation and anchor resolution alternate until the anchors
/// settle or `max_passes` is reached, in which case the last route is used.
pub fn route_regular<S: InterchangeSink>(
    diagram: &mut Diagram,
    id: ConnectionId,
    seed: Option<&[Point]>,
    config: &RouterConfig,
    sink: &mut S,
) -> Result<RouteOutcome, RouteError> {
    let connection = diagram
        .connection(id)
        .ok_or(RouteError::UnknownConnection(id))?;
    let name = connection.name.clone();
    let interior: Vec<Point> = match seed {
        Some(points) => points.to_vec(),
        None => connection.bendpoints.clone(),
    };
    let mut ctx = RoutingContext::snapshot(
        &*diagram,
        connection.start,
        connection.end,
        &connection.bendpoints,
    );

    let mut passes = 0;
    loop {
        let (start, end) = (ctx.start, ctx.end);
        ctx.reset_points(&*diagram, start, end, &interior);
        remove_contained_points(&*diagram, &mut ctx);
        passes += 1;
        if passes >= config.max_passes || !resolve_anchors(&*diagram, &mut ctx, config) {
            break;
        }
    }
    tracing::debug!(connection = %name, passes, "route calculated");

    let stack_offset = if config.separate_stacked {
        separate_if_stacked(diagram, id, &mut ctx, config)
    } else {
        None
    };

    let changed = ctx.points_changed();
    if changed {
        commit(diagram, id, &ctx, sink)?;
    }
    Ok(RouteOutcome {
        changed,
        passes,
        stack_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bounds, Edge};

    #[test]
    fn test_point_inside_source_is_removed() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape("a", Bounds::new(0, 0, 50, 50));
        let b = diagram.add_shape("b", Bounds::new(200, 0, 50, 50));
        let start = diagram.boundary_anchor(a, Edge::Right);
        let end = diagram.boundary_anchor(b, Edge::Left);
        let mut ctx = RoutingContext::snapshot(
            &diagram,
            start,
            end,
            &[Point::new(25, 25), Point::new(120, 25)],
        );
        assert!(remove_contained_points(&diagram, &mut ctx));
        assert_eq!(
            ctx.new_points,
            vec![Point::new(50, 25), Point::new(120, 25), Point::new(200, 25)]
        );
    }

    #[test]
    fn test_consecutive_contained_points_are_all_removed() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape("a", Bounds::new(0, 0, 50, 50));
        let b = diagram.add_shape("b", Bounds::new(200, 0, 50, 50));
        let start = diagram.boundary_anchor(a, Edge::Right);
        let end = diagram.boundary_anchor(b, Edge::Left);
        let mut ctx = RoutingContext::snapshot(
            &diagram,
            start,
            end,
            &[Point::new(10, 10), Point::new(20, 20), Point::new(210, 10)],
        );
        assert!(remove_contained_points(&diagram, &mut ctx));
        assert_eq!(ctx.new_points.len(), 2);
    }

    #[test]
    fn test_outside_points_are_kept() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape("a", Bounds::new(0, 0, 50, 50));
        let b = diagram.add_shape("b", Bounds::new(200, 0, 50, 50));
        let start = diagram.boundary_anchor(a, Edge::Right);
        let end = diagram.boundary_anchor(b, Edge::Left);
        let mut ctx = RoutingContext::snapshot(&diagram, start, end, &[Point::new(120, 25)]);
        assert!(!remove_contained_points(&diagram, &mut ctx));
        assert_eq!(ctx.new_points.len(), 3);
    }
}
