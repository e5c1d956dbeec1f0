//! Re-snapping boundary anchors to a freshly calculated route

use crate::model::{Geometry, Point};

use super::config::RouterConfig;
use super::context::RoutingContext;

/// Move each boundary endpoint to the boundary anchor nearest to the route.
///
/// The reference point is the neighbour of the endpoint, or the point after
/// it when the neighbour lies within the snap distance. Fixed anchors stay
/// put. Returns true if either endpoint changed.
pub fn resolve_anchors<G: Geometry>(
    geometry: &G,
    ctx: &mut RoutingContext,
    config: &RouterConfig,
) -> bool {
    let points = &ctx.new_points;
    let len = points.len();
    if len < 2 {
        return false;
    }
    let mut changed = false;

    if geometry.is_boundary_anchor(ctx.start) {
        let reference = reference_point(points[0], points[1], points.get(2), len, config);
        let (edge, anchor) = geometry.nearest_boundary_anchor(ctx.source, reference);
        if anchor != ctx.start {
            tracing::debug!(%edge, %reference, "start anchor moves");
            ctx.start = anchor;
            changed = true;
        }
    }

    if geometry.is_boundary_anchor(ctx.end) {
        let inner = len.checked_sub(3).map(|i| &points[i]);
        let reference = reference_point(points[len - 1], points[len - 2], inner, len, config);
        let (edge, anchor) = geometry.nearest_boundary_anchor(ctx.target, reference);
        if anchor != ctx.end {
            tracing::debug!(%edge, %reference, "end anchor moves");
            ctx.end = anchor;
            changed = true;
        }
    }

    changed
}

fn reference_point(
    endpoint: Point,
    neighbour: Point,
    inner: Option<&Point>,
    len: usize,
    config: &RouterConfig,
) -> Point {
    match inner {
        Some(inner) if len > 2 && neighbour.distance(endpoint) <= config.snap_distance => *inner,
        _ => neighbour,
    }
}
