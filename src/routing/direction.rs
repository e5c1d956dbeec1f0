//! Orthogonal direction of a route at a given point

use crate::model::{AnchorId, Direction, Edge, Geometry, Point};

use super::error::NonOrthogonal;

/// Infer the direction of the route leaving `points[index]`.
///
/// At the endpoints the direction comes from where the anchor sits on its
/// shape. At an interior point the route turns orthogonally to the incoming
/// segment, towards the next point. A degenerate or diagonal incoming
/// segment falls back to the previous point.
pub fn direction<G: Geometry>(
    geometry: &G,
    points: &[Point],
    start: AnchorId,
    end: AnchorId,
    index: usize,
) -> Result<Direction, NonOrthogonal> {
    if points.len() < 2 || index >= points.len() {
        return Err(NonOrthogonal { index });
    }
    let p1 = points[index];

    if index == 0 {
        return Ok(endpoint_direction(geometry, start, p1, true));
    }
    if index == points.len() - 1 {
        return Ok(endpoint_direction(geometry, end, p1, false));
    }

    let p0 = points[index - 1];
    let p2 = points[index + 1];
    if p0 == p1 {
        return direction(geometry, points, start, end, index - 1);
    }
    if p0.is_horizontal_to(p1) {
        if p2.y > p1.y {
            Ok(Direction::Down)
        } else {
            Ok(Direction::Up)
        }
    } else if p0.is_vertical_to(p1) {
        if p2.x > p1.x {
            Ok(Direction::Right)
        } else {
            Ok(Direction::Left)
        }
    } else {
        direction(geometry, points, start, end, index - 1)
    }
}

fn endpoint_direction<G: Geometry>(
    geometry: &G,
    anchor: AnchorId,
    point: Point,
    is_start: bool,
) -> Direction {
    let shape = geometry.anchor_shape(anchor);
    if geometry.is_boundary_anchor(anchor) {
        let (edge, _) = geometry.nearest_boundary_anchor(shape, point);
        return inward(edge);
    }
    let edge = geometry.nearest_edge(shape, point);
    if is_start {
        outward(edge)
    } else {
        inward(edge)
    }
}

fn inward(edge: Edge) -> Direction {
    match edge {
        Edge::Top => Direction::Down,
        Edge::Bottom => Direction::Up,
        Edge::Left => Direction::Right,
        Edge::Right => Direction::Left,
    }
}

fn outward(edge: Edge) -> Direction {
    match edge {
        Edge::Top => Direction::Up,
        Edge::Bottom => Direction::Down,
        Edge::Left => Direction::Left,
        Edge::Right => Direction::Right,
    }
}
