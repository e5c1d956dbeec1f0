//! Geometry queries the router needs from the diagram framework

use super::diagram::{AnchorId, AnchorKind, Diagram, ShapeId};
use super::types::{Bounds, Edge, Point};

/// Shape and anchor geometry as seen by the router.
///
/// Ids passed in must belong to the implementor; anything else is a caller
/// bug and implementations may panic.
pub trait Geometry {
    /// Bounds of a shape in diagram coordinates
    fn shape_bounds(&self, shape: ShapeId) -> Bounds;

    /// The shape that owns an anchor
    fn anchor_shape(&self, anchor: AnchorId) -> ShapeId;

    fn anchor_kind(&self, anchor: AnchorId) -> AnchorKind;

    /// Resolved position of an anchor in diagram coordinates
    fn anchor_position(&self, anchor: AnchorId) -> Point;

    /// The boundary anchor a shape keeps on the given edge
    fn boundary_anchor(&self, shape: ShapeId, edge: Edge) -> AnchorId;

    fn is_boundary_anchor(&self, anchor: AnchorId) -> bool {
        matches!(self.anchor_kind(anchor), AnchorKind::Boundary(_))
    }

    fn contains(&self, shape: ShapeId, point: Point) -> bool {
        self.shape_bounds(shape).contains(point)
    }

    fn intersects(&self, shape: ShapeId, bounds: &Bounds) -> bool {
        self.shape_bounds(shape).intersects(bounds)
    }

    fn nearest_edge(&self, shape: ShapeId, point: Point) -> Edge {
        self.shape_bounds(shape).nearest_edge(point)
    }

    /// Boundary anchor of `shape` closest to `point`, with its edge.
    /// Ties resolve in [`Edge::ALL`] order.
    fn nearest_boundary_anchor(&self, shape: ShapeId, point: Point) -> (Edge, AnchorId) {
        let candidate = |edge: Edge| {
            let anchor = self.boundary_anchor(shape, edge);
            (self.anchor_position(anchor).distance(point), edge, anchor)
        };
        let mut best = candidate(Edge::Top);
        for edge in [Edge::Bottom, Edge::Left, Edge::Right] {
            let next = candidate(edge);
            if next.0 < best.0 {
                best = next;
            }
        }
        (best.1, best.2)
    }
}

impl Geometry for Diagram {
    fn shape_bounds(&self, shape: ShapeId) -> Bounds {
        self.shapes[shape.0].bounds
    }

    fn anchor_shape(&self, anchor: AnchorId) -> ShapeId {
        self.anchors[anchor.0].shape
    }

    fn anchor_kind(&self, anchor: AnchorId) -> AnchorKind {
        self.anchors[anchor.0].kind
    }

    fn anchor_position(&self, anchor: AnchorId) -> Point {
        Diagram::anchor_position(self, anchor)
    }

    fn boundary_anchor(&self, shape: ShapeId, edge: Edge) -> AnchorId {
        self.shapes[shape.0].boundary_anchor(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_boundary_anchor() {
        let mut diagram = Diagram::new();
        let task = diagram.add_shape("task", Bounds::new(0, 0, 100, 60));
        let (edge, anchor) = diagram.nearest_boundary_anchor(task, Point::new(300, 30));
        assert_eq!(edge, Edge::Right);
        assert_eq!(anchor, diagram.boundary_anchor(task, Edge::Right));
        let (edge, _) = diagram.nearest_boundary_anchor(task, Point::new(50, -80));
        assert_eq!(edge, Edge::Top);
    }

    #[test]
    fn test_nearest_boundary_anchor_tie_prefers_top() {
        let mut diagram = Diagram::new();
        let square = diagram.add_shape("square", Bounds::new(0, 0, 100, 100));
        // equidistant from the top and left midpoints
        let (edge, _) = diagram.nearest_boundary_anchor(square, Point::new(0, 0));
        assert_eq!(edge, Edge::Top);
    }

    #[test]
    fn test_anchor_classification() {
        let mut diagram = Diagram::new();
        let task = diagram.add_shape("task", Bounds::new(0, 0, 100, 60));
        let port = diagram.add_fixed_anchor(task, "port", Point::new(0, 10));
        assert!(diagram.is_boundary_anchor(diagram.boundary_anchor(task, Edge::Left)));
        assert!(!diagram.is_boundary_anchor(port));
        assert_eq!(diagram.anchor_shape(port), task);
    }

    #[test]
    fn test_containment_and_intersection() {
        let mut diagram = Diagram::new();
        let task = diagram.add_shape("task", Bounds::new(0, 0, 50, 50));
        assert!(diagram.contains(task, Point::new(25, 25)));
        assert!(!diagram.contains(task, Point::new(60, 25)));
        assert!(diagram.intersects(task, &Bounds::new(40, 20, 100, 0)));
        assert!(!diagram.intersects(task, &Bounds::new(60, 20, 100, 0)));
    }
}
