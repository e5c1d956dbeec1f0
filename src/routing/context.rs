//! Per-call routing state

use crate::model::{AnchorId, Geometry, Point, ShapeId};

/// Scratch state of one routing call.
///
/// `old_points` is the connection's geometry before routing; `new_points` is
/// the candidate route whose first and last entries always sit on `start` and
/// `end`.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    pub old_points: Vec<Point>,
    pub new_points: Vec<Point>,
    pub start: AnchorId,
    pub end: AnchorId,
    pub source: ShapeId,
    pub target: ShapeId,
}

impl RoutingContext {
    /// Snapshot the current geometry of a connection
    pub fn snapshot<G: Geometry>(
        geometry: &G,
        start: AnchorId,
        end: AnchorId,
        bendpoints: &[Point],
    ) -> Self {
        let old_points = build_points(geometry, start, end, bendpoints);
        Self {
            new_points: old_points.clone(),
            old_points,
            start,
            end,
            source: geometry.anchor_shape(start),
            target: geometry.anchor_shape(end),
        }
    }

    /// Replace the endpoints and rebuild `new_points` between them
    pub fn reset_points<G: Geometry>(
        &mut self,
        geometry: &G,
        start: AnchorId,
        end: AnchorId,
        interior: &[Point],
    ) {
        self.start = start;
        self.end = end;
        self.new_points = build_points(geometry, start, end, interior);
    }

    /// Whether the candidate route differs from the original geometry
    pub fn points_changed(&self) -> bool {
        !self.new_points.is_empty() && self.old_points != self.new_points
    }

    /// Interior points of the candidate route
    pub fn interior(&self) -> &[Point] {
        let len = self.new_points.len();
        if len < 2 {
            return &[];
        }
        &self.new_points[1..len - 1]
    }
}

fn build_points<G: Geometry>(
    geometry: &G,
    start: AnchorId,
    end: AnchorId,
    interior: &[Point],
) -> Vec<Point> {
    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(geometry.anchor_position(start));
    points.extend_from_slice(interior);
    points.push(geometry.anchor_position(end));
    points
}
