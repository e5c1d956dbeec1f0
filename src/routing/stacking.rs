//! Separating connections that would be drawn on top of each other

use crate::model::types::saturate;
use crate::model::{ConnectionId, Diagram, Direction, Point};

use super::config::RouterConfig;
use super::context::RoutingContext;
use super::direction::direction;

/// True when two routes cover the same points, in either order
pub fn stacked_equal(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && (a == b || a.iter().eq(b.iter().rev()))
}

/// Offset the candidate route when sibling connections on the same start
/// anchor already follow it.
///
/// Each coincident sibling adds `stack_offset` to the jog. Returns the offset
/// applied, or `None` when the route was left alone.
pub fn separate_if_stacked(
    diagram: &Diagram,
    id: ConnectionId,
    ctx: &mut RoutingContext,
    config: &RouterConfig,
) -> Option<i32> {
    let coincident = diagram
        .connections_at(ctx.start)
        .filter(|(other, _)| *other != id)
        .filter_map(|(other, _)| diagram.connection_points(other))
        .filter(|points| stacked_equal(&ctx.new_points, points))
        .count();
    if coincident == 0 {
        return None;
    }
    let offset = config
        .stack_offset
        .saturating_mul(i32::try_from(coincident).unwrap_or(i32::MAX));
    if offset == 0 {
        return None;
    }

    match direction(diagram, &ctx.new_points, ctx.start, ctx.end, 0) {
        Ok(d) => {
            tracing::debug!(coincident, offset, ?d, "separating stacked connection");
            offset_points(&mut ctx.new_points, d, offset);
            Some(offset)
        }
        Err(err) => {
            tracing::debug!(%err, "stacked connection left as is");
            None
        }
    }
}

/// Shift the interior of a route and insert jog points near both ends.
///
/// Routes leaving vertically are shifted diagonally and jog sideways; routes
/// leaving horizontally shift the other way and jog vertically.
pub fn offset_points(points: &mut Vec<Point>, d: Direction, offset: i32) {
    let len = points.len();
    if len < 2 {
        return;
    }
    let p0 = points[0];
    let p1 = points[1];
    let p2 = points[len - 2];
    let p3 = points[len - 1];

    let (dx, dy) = if d.is_vertical() {
        (offset, offset)
    } else {
        (-offset, offset)
    };
    for p in &mut points[1..len - 1] {
        *p = p.translate(dx, dy);
    }

    let (near_start, near_end) = if d.is_vertical() {
        (
            Point::new(p0.x, third_toward(p0.y, p1.y)),
            Point::new(p3.x, third_toward(p3.y, p2.y)),
        )
    } else {
        (
            Point::new(third_toward(p0.x, p1.x), p0.y),
            Point::new(third_toward(p3.x, p2.x), p3.y),
        )
    };
    let (jx, jy) = if d.is_vertical() { (offset, 0) } else { (0, offset) };

    points.insert(1, near_start);
    points.insert(2, near_start.translate(jx, jy));
    let end = points.len() - 1;
    points.insert(end, near_end.translate(jx, jy));
    points.insert(end + 1, near_end);
}

/// One third of the way from `from` to `to`, truncating toward `from`
fn third_toward(from: i32, to: i32) -> i32 {
    saturate(i64::from(from) + (i64::from(to) - i64::from(from)) / 3)
}
