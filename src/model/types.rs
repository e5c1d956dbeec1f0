//! Core geometric types shared by the diagram model and the router

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point in diagram-relative integer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// True when the segment to `other` is vertical (equal x).
    ///
    /// A zero-length segment counts as both vertical and horizontal.
    pub fn is_vertical_to(&self, other: Point) -> bool {
        self.x == other.x
    }

    /// True when the segment to `other` is horizontal (equal y)
    pub fn is_horizontal_to(&self, other: Point) -> bool {
        self.y == other.y
    }

    /// Shift the point, saturating at the coordinate range
    pub fn translate(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Narrow a wide intermediate back to a coordinate, saturating at the `i32` range
pub(crate) fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Format a point sequence as `(x,y) (x,y) ...`
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// An axis-aligned rectangle describing the extent of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest bounds enclosing every point, or `None` for an empty slice
    pub fn enclosing(points: &[Point]) -> Option<Bounds> {
        let first = *points.first()?;
        let start = Bounds::new(first.x, first.y, 0, 0);
        Some(
            points[1..]
                .iter()
                .fold(start, |acc, p| acc.expand_to_include(*p)),
        )
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Horizontal middle, where the top and bottom anchors sit
    pub fn mid_x(&self) -> i32 {
        self.x.saturating_add(self.width / 2)
    }

    /// Vertical middle, where the left and right anchors sit
    pub fn mid_y(&self) -> i32 {
        self.y.saturating_add(self.height / 2)
    }

    /// Check if the bounds contain a point (border inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if these bounds overlap another rectangle
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Expand these bounds to include a point
    pub fn expand_to_include(&self, point: Point) -> Bounds {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        Bounds::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Midpoint of the given edge, where the boundary anchor for that edge sits
    pub fn edge_midpoint(&self, edge: Edge) -> Point {
        match edge {
            Edge::Top => Point::new(self.mid_x(), self.y),
            Edge::Bottom => Point::new(self.mid_x(), self.bottom()),
            Edge::Left => Point::new(self.x, self.mid_y()),
            Edge::Right => Point::new(self.right(), self.mid_y()),
        }
    }

    /// The edge whose line lies closest to a point; ties go to the earlier
    /// edge in [`Edge::ALL`] order
    pub fn nearest_edge(&self, point: Point) -> Edge {
        let gap = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs();
        let distance = |edge: Edge| match edge {
            Edge::Top => gap(point.y, self.y),
            Edge::Bottom => gap(point.y, self.bottom()),
            Edge::Left => gap(point.x, self.x),
            Edge::Right => gap(point.x, self.right()),
        };
        let mut best = Edge::Top;
        for edge in Edge::ALL {
            if distance(edge) < distance(best) {
                best = edge;
            }
        }
        best
    }
}

/// Side of a shape, used for boundary anchor locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// All edges in tie-break order
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }

    /// Parse a boundary anchor name (`top`, `bottom`, `left`, `right`)
    pub fn from_name(name: &str) -> Option<Edge> {
        Edge::ALL.into_iter().find(|edge| edge.name() == name)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orthogonal orientation of a route at a given point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_distance_across_the_coordinate_range() {
        let d = Point::new(i32::MAX, 0).distance(Point::new(i32::MIN, 0));
        assert_eq!(d, 4_294_967_295.0);
    }

    #[test]
    fn test_edges_saturate_at_the_coordinate_range() {
        let b = Bounds::new(i32::MAX - 10, i32::MAX - 10, 100, 60);
        assert_eq!(b.right(), i32::MAX);
        assert_eq!(b.bottom(), i32::MAX);
        assert_eq!(b.edge_midpoint(Edge::Bottom), Point::new(i32::MAX, i32::MAX));
        assert_eq!(b.nearest_edge(Point::new(i32::MIN, i32::MAX - 20)), Edge::Top);
        assert_eq!(Point::new(i32::MIN, 0).translate(-1, 0), Point::new(i32::MIN, 0));
    }

    #[test]
    fn test_degenerate_segment_is_both_orientations() {
        let p = Point::new(7, 7);
        assert!(p.is_vertical_to(p));
        assert!(p.is_horizontal_to(p));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(-3, 12).to_string(), "(-3,12)");
        assert_eq!(
            format_points(&[Point::new(0, 0), Point::new(20, 0)]),
            "(0,0) (20,0)"
        );
    }

    #[test]
    fn test_bounds_edges() {
        let bounds = Bounds::new(10, 20, 100, 50);
        assert_eq!(bounds.right(), 110);
        assert_eq!(bounds.bottom(), 70);
        assert_eq!(bounds.center(), Point::new(60, 45));
    }

    #[test]
    fn test_bounds_contains_border() {
        let bounds = Bounds::new(0, 0, 50, 50);
        assert!(bounds.contains(Point::new(25, 25)));
        assert!(bounds.contains(Point::new(0, 0)));
        assert!(bounds.contains(Point::new(50, 50)));
        assert!(!bounds.contains(Point::new(-1, 25)));
        assert!(!bounds.contains(Point::new(51, 25)));
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new(0, 0, 100, 100);
        let b = Bounds::new(50, 50, 100, 100);
        let c = Bounds::new(200, 200, 50, 50);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_enclosing_points() {
        let points = [Point::new(10, 40), Point::new(-5, 0), Point::new(30, 10)];
        assert_eq!(Bounds::enclosing(&points), Some(Bounds::new(-5, 0, 35, 40)));
        assert_eq!(Bounds::enclosing(&[]), None);
    }

    #[test]
    fn test_edge_midpoints() {
        let bounds = Bounds::new(0, 0, 100, 60);
        assert_eq!(bounds.edge_midpoint(Edge::Top), Point::new(50, 0));
        assert_eq!(bounds.edge_midpoint(Edge::Bottom), Point::new(50, 60));
        assert_eq!(bounds.edge_midpoint(Edge::Left), Point::new(0, 30));
        assert_eq!(bounds.edge_midpoint(Edge::Right), Point::new(100, 30));
    }

    #[test]
    fn test_nearest_edge() {
        let bounds = Bounds::new(0, 0, 100, 60);
        assert_eq!(bounds.nearest_edge(Point::new(50, -30)), Edge::Top);
        assert_eq!(bounds.nearest_edge(Point::new(50, 65)), Edge::Bottom);
        assert_eq!(bounds.nearest_edge(Point::new(-10, 30)), Edge::Left);
        assert_eq!(bounds.nearest_edge(Point::new(140, 30)), Edge::Right);
    }

    #[test]
    fn test_edge_names_round_trip() {
        for edge in Edge::ALL {
            assert_eq!(Edge::from_name(edge.name()), Some(edge));
        }
        assert_eq!(Edge::from_name("middle"), None);
    }
}
