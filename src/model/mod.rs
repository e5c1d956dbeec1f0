//! Diagram model consumed by the router
//!
//! Shapes, anchors and connections live in a [`Diagram`] arena. The router
//! reads geometry through the [`Geometry`] trait and reports committed routes
//! to an [`InterchangeSink`].

pub mod diagram;
pub mod geometry;
pub mod interchange;
pub mod types;

pub use diagram::{
    Anchor, AnchorId, AnchorKind, Connection, ConnectionId, ConnectionKind, Diagram,
    RoutingHints, Shape, ShapeId,
};
pub use geometry::Geometry;
pub use interchange::{DiagramInterchange, InterchangeEdge, InterchangeSink, NullSink};
pub use types::{format_points, Bounds, Direction, Edge, Point};
