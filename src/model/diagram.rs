//! In-memory diagram: shapes, anchors and connections
//!
//! The diagram is an arena. Shapes own their anchors, connections reference
//! anchors by id, and an anchor may be shared by any number of connections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{saturate, Bounds, Edge, Point};

/// Index of a shape in its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

/// Index of an anchor in its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub(crate) usize);

/// Index of a connection in its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub(crate) usize);

impl ConnectionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A rectangular node that owns anchors
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: String,
    pub bounds: Bounds,
    /// Boundary anchors in [`Edge::ALL`] order
    boundary: [AnchorId; 4],
    fixed: Vec<AnchorId>,
}

impl Shape {
    pub fn boundary_anchor(&self, edge: Edge) -> AnchorId {
        match edge {
            Edge::Top => self.boundary[0],
            Edge::Bottom => self.boundary[1],
            Edge::Left => self.boundary[2],
            Edge::Right => self.boundary[3],
        }
    }

    pub fn fixed_anchors(&self) -> &[AnchorId] {
        &self.fixed
    }

    /// Every anchor owned by this shape, boundary anchors first
    pub fn anchors(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.boundary.iter().chain(self.fixed.iter()).copied()
    }
}

/// How an anchor derives its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// Explicit coordinate relative to the owning shape's origin
    Fixed { offset: Point },
    /// Midpoint of one side of the owning shape, recomputed from its bounds
    Boundary(Edge),
}

/// An attachment point owned by a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub shape: ShapeId,
    pub kind: AnchorKind,
}

/// Whether a connection accepts free-form bendpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionKind {
    #[default]
    FreeForm,
    /// A direct line; the router leaves it alone
    Straight,
}

/// Bendpoint indices the user just dragged or inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingHints {
    pub moved: Option<usize>,
    pub added: Option<usize>,
}

/// An edge between two anchors with an ordered list of bendpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub name: String,
    pub start: AnchorId,
    pub end: AnchorId,
    pub kind: ConnectionKind,
    pub bendpoints: Vec<Point>,
    /// Reroute even a self-loop that looks manually shaped
    pub force_routing: bool,
    pub hints: RoutingHints,
}

impl Connection {
    pub fn new(name: impl Into<String>, start: AnchorId, end: AnchorId) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            kind: ConnectionKind::FreeForm,
            bendpoints: Vec::new(),
            force_routing: false,
            hints: RoutingHints::default(),
        }
    }

    pub fn with_bendpoints(mut self, bendpoints: Vec<Point>) -> Self {
        self.bendpoints = bendpoints;
        self
    }

    pub fn with_kind(mut self, kind: ConnectionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_force_routing(mut self, force: bool) -> Self {
        self.force_routing = force;
        self
    }

    /// Record the bendpoint the user just moved.
    ///
    /// A non-negative index is clamped to the last bendpoint; a negative index,
    /// or a connection without bendpoints, removes the hint.
    pub fn set_moved_bendpoint(&mut self, index: isize) {
        self.hints.moved = self.clamp_hint(index);
    }

    /// Record the bendpoint the user just inserted, with the same clamping as
    /// [`Connection::set_moved_bendpoint`]
    pub fn set_added_bendpoint(&mut self, index: isize) {
        self.hints.added = self.clamp_hint(index);
    }

    fn clamp_hint(&self, index: isize) -> Option<usize> {
        let size = self.bendpoints.len();
        match usize::try_from(index) {
            Ok(index) if size > 0 => Some(index.min(size - 1)),
            _ => None,
        }
    }

    pub fn moved_bendpoint(&self) -> Option<Point> {
        self.hints.moved.and_then(|i| self.bendpoints.get(i).copied())
    }

    pub fn added_bendpoint(&self) -> Option<Point> {
        self.hints.added.and_then(|i| self.bendpoints.get(i).copied())
    }

    /// The hinted bendpoint, preferring a moved one over an added one
    pub fn hint_point(&self) -> Option<Point> {
        self.moved_bendpoint().or_else(|| self.added_bendpoint())
    }
}

/// Arena of shapes, anchors and connections
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) anchors: Vec<Anchor>,
    connections: Vec<Connection>,
    shape_names: HashMap<String, ShapeId>,
    connection_names: HashMap<String, ConnectionId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape together with its four boundary anchors
    pub fn add_shape(&mut self, name: impl Into<String>, bounds: Bounds) -> ShapeId {
        let name = name.into();
        let id = ShapeId(self.shapes.len());
        let boundary = Edge::ALL.map(|edge| {
            self.push_anchor(Anchor {
                name: edge.name().to_string(),
                shape: id,
                kind: AnchorKind::Boundary(edge),
            })
        });
        self.shape_names.insert(name.clone(), id);
        self.shapes.push(Shape {
            name,
            bounds,
            boundary,
            fixed: Vec::new(),
        });
        id
    }

    /// Add a fixed-point anchor at an offset from the shape's origin
    pub fn add_fixed_anchor(
        &mut self,
        shape: ShapeId,
        name: impl Into<String>,
        offset: Point,
    ) -> AnchorId {
        let id = self.push_anchor(Anchor {
            name: name.into(),
            shape,
            kind: AnchorKind::Fixed { offset },
        });
        self.shapes[shape.0].fixed.push(id);
        id
    }

    fn push_anchor(&mut self, anchor: Anchor) -> AnchorId {
        let id = AnchorId(self.anchors.len());
        self.anchors.push(anchor);
        id
    }

    pub fn add_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = ConnectionId(self.connections.len());
        self.connection_names.insert(connection.name.clone(), id);
        self.connections.push(connection);
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn anchor(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.get(id.0)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id.0)
    }

    pub fn shape_by_name(&self, name: &str) -> Option<ShapeId> {
        self.shape_names.get(name).copied()
    }

    pub fn connection_by_name(&self, name: &str) -> Option<ConnectionId> {
        self.connection_names.get(name).copied()
    }

    /// Look up an anchor of a shape by name: a boundary edge name or the name
    /// of one of its fixed anchors
    pub fn anchor_by_name(&self, shape: ShapeId, name: &str) -> Option<AnchorId> {
        let shape = self.shape(shape)?;
        if let Some(edge) = Edge::from_name(name) {
            return Some(shape.boundary_anchor(edge));
        }
        shape
            .fixed
            .iter()
            .copied()
            .find(|id| self.anchors[id.0].name == name)
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, c)| (ConnectionId(i), c))
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        (0..self.connections.len()).map(ConnectionId).collect()
    }

    /// Connections that start or end at the anchor, in diagram order
    pub fn connections_at(
        &self,
        anchor: AnchorId,
    ) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections()
            .filter(move |(_, c)| c.start == anchor || c.end == anchor)
    }

    /// Resolved position of an anchor in diagram coordinates
    pub fn anchor_position(&self, id: AnchorId) -> Point {
        let anchor = &self.anchors[id.0];
        let bounds = self.shapes[anchor.shape.0].bounds;
        match anchor.kind {
            AnchorKind::Fixed { offset } => Point::new(
                bounds.x.saturating_add(offset.x),
                bounds.y.saturating_add(offset.y),
            ),
            AnchorKind::Boundary(edge) => bounds.edge_midpoint(edge),
        }
    }

    /// Full point sequence of a connection: start, bendpoints, end
    pub fn connection_points(&self, id: ConnectionId) -> Option<Vec<Point>> {
        let connection = self.connection(id)?;
        let mut points = Vec::with_capacity(connection.bendpoints.len() + 2);
        points.push(self.anchor_position(connection.start));
        points.extend_from_slice(&connection.bendpoints);
        points.push(self.anchor_position(connection.end));
        Some(points)
    }

    /// Move or resize a shape.
    ///
    /// Boundary anchors follow the new bounds on their own; fixed anchors are
    /// scaled with the size change so they keep their relative position.
    pub fn set_shape_bounds(&mut self, id: ShapeId, bounds: Bounds) -> bool {
        let Some(shape) = self.shapes.get_mut(id.0) else {
            return false;
        };
        let old = shape.bounds;
        shape.bounds = bounds;
        for anchor_id in shape.fixed.clone() {
            if let AnchorKind::Fixed { offset } = &mut self.anchors[anchor_id.0].kind {
                offset.x = scale(offset.x, old.width, bounds.width);
                offset.y = scale(offset.y, old.height, bounds.height);
            }
        }
        true
    }
}

fn scale(value: i32, from: i32, to: i32) -> i32 {
    if from == 0 {
        return value;
    }
    saturate(i64::from(value) * i64::from(to) / i64::from(from))
}
