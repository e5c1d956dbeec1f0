//! Committing a calculated route onto its connection

use crate::model::{ConnectionId, Diagram, InterchangeSink, Point};

use super::context::RoutingContext;
use super::error::RouteError;

/// Drop interior points that do not define a turn.
///
/// A point is redundant when the segment from the last kept point to it and
/// the segment from it to the next point are both vertical or both
/// horizontal. Endpoints are never part of the result.
pub fn collapse_collinear(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return Vec::new();
    }
    let mut kept = Vec::with_capacity(points.len() - 2);
    let mut p1 = points[0];
    for window in points[1..].windows(2) {
        let (p2, p3) = (window[0], window[1]);
        let straight = (p1.is_vertical_to(p2) && p2.is_vertical_to(p3))
            || (p1.is_horizontal_to(p2) && p2.is_horizontal_to(p3));
        if straight {
            continue;
        }
        kept.push(p2);
        p1 = p2;
    }
    kept
}

/// Write the context's route onto the connection and sync its visual edge
pub fn commit<S: InterchangeSink>(
    diagram: &mut Diagram,
    id: ConnectionId,
    ctx: &RoutingContext,
    sink: &mut S,
) -> Result<(), RouteError> {
    let bendpoints = collapse_collinear(&ctx.new_points);
    let connection = diagram
        .connection_mut(id)
        .ok_or(RouteError::UnknownConnection(id))?;
    connection.start = ctx.start;
    connection.end = ctx.end;
    connection.bendpoints = bendpoints;
    tracing::debug!(
        connection = %connection.name,
        bendpoints = connection.bendpoints.len(),
        "route committed"
    );

    let name = connection.name.clone();
    let waypoints = diagram
        .connection_points(id)
        .ok_or(RouteError::UnknownConnection(id))?;
    sink.sync_edge(id, &name, &waypoints);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_collapse_drops_collinear_point() {
        let points = pts(&[(0, 0), (10, 0), (20, 0), (20, 10)]);
        assert_eq!(collapse_collinear(&points), pts(&[(20, 0)]));
    }

    #[test]
    fn test_collapse_keeps_turns() {
        let points = pts(&[(0, 0), (0, 50), (80, 50), (80, 100)]);
        assert_eq!(collapse_collinear(&points), pts(&[(0, 50), (80, 50)]));
    }

    #[test]
    fn test_collapse_vertical_run() {
        let points = pts(&[(5, 0), (5, 10), (5, 20), (5, 30), (40, 30)]);
        assert_eq!(collapse_collinear(&points), pts(&[(5, 30)]));
    }

    #[test]
    fn test_collapse_two_points_has_no_bendpoints() {
        assert!(collapse_collinear(&pts(&[(0, 0), (40, 40)])).is_empty());
    }

    #[test]
    fn test_collapse_keeps_diagonal_points() {
        let points = pts(&[(0, 0), (10, 5), (20, 20)]);
        assert_eq!(collapse_collinear(&points), pts(&[(10, 5)]));
    }
}
