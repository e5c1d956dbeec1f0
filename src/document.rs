//! TOML diagram documents
//!
//! A document lists shapes (with optional fixed anchors) and connections
//! between named anchors. It loads into a [`Diagram`] and a routed diagram
//! writes back to the same format.
//!
//! ```toml
//! [[shapes]]
//! id = "task"
//! bounds = { x = 0, y = 0, width = 100, height = 60 }
//! anchors = [{ id = "in", offset = { x = 0, y = 30 } }]
//!
//! [[connections]]
//! id = "flow"
//! source = { shape = "task", anchor = "right" }
//! target = { shape = "end", anchor = "left" }
//! bendpoints = [{ x = 150, y = 30 }]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use toml::Spanned;

use crate::error::DocumentError;
use crate::model::{Bounds, Connection, ConnectionKind, Diagram, Edge, Point};
use crate::routing::RouterConfig;

/// A loaded document: the diagram plus any router settings it carries
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub diagram: Diagram,
    pub router: Option<RouterConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    router: Option<RouterConfig>,
    #[serde(default)]
    shapes: Vec<TomlShape>,
    #[serde(default)]
    connections: Vec<TomlConnection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlShape {
    id: Spanned<String>,
    bounds: Bounds,
    #[serde(default)]
    anchors: Vec<TomlAnchor>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlAnchor {
    id: Spanned<String>,
    offset: Point,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEndpoint {
    shape: Spanned<String>,
    anchor: Spanned<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConnection {
    id: Spanned<String>,
    source: TomlEndpoint,
    target: TomlEndpoint,
    #[serde(default)]
    bendpoints: Vec<Point>,
    #[serde(default)]
    kind: ConnectionKind,
    #[serde(default)]
    force: bool,
    moved: Option<isize>,
    added: Option<isize>,
}

/// Parse a document, validating ids and anchor references
pub fn parse_document(source: &str) -> Result<Document, DocumentError> {
    let parsed: TomlDocument = toml::from_str(source)?;
    let mut diagram = Diagram::new();

    for shape in &parsed.shapes {
        if diagram.shape_by_name(shape.id.get_ref()).is_some() {
            return Err(DocumentError::duplicate("shape", shape.id.get_ref(), shape.id.span()));
        }
        let id = diagram.add_shape(shape.id.get_ref().as_str(), shape.bounds);

        let mut seen = HashSet::new();
        for anchor in &shape.anchors {
            let name = anchor.id.get_ref();
            if Edge::from_name(name).is_some() {
                return Err(DocumentError::ReservedAnchorName {
                    name: name.clone(),
                    span: anchor.id.span(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(DocumentError::duplicate("anchor", name, anchor.id.span()));
            }
            diagram.add_fixed_anchor(id, name.as_str(), anchor.offset);
        }
    }

    for raw in &parsed.connections {
        if diagram.connection_by_name(raw.id.get_ref()).is_some() {
            return Err(DocumentError::duplicate("connection", raw.id.get_ref(), raw.id.span()));
        }
        let start = resolve_endpoint(&diagram, &raw.source)?;
        let end = resolve_endpoint(&diagram, &raw.target)?;
        let mut connection = Connection::new(raw.id.get_ref().as_str(), start, end)
            .with_bendpoints(raw.bendpoints.clone())
            .with_kind(raw.kind)
            .with_force_routing(raw.force);
        if let Some(index) = raw.moved {
            connection.set_moved_bendpoint(index);
        }
        if let Some(index) = raw.added {
            connection.set_added_bendpoint(index);
        }
        diagram.add_connection(connection);
    }

    Ok(Document {
        diagram,
        router: parsed.router,
    })
}

fn resolve_endpoint(
    diagram: &Diagram,
    endpoint: &TomlEndpoint,
) -> Result<crate::model::AnchorId, DocumentError> {
    let shape_name = endpoint.shape.get_ref();
    let shape = diagram
        .shape_by_name(shape_name)
        .ok_or_else(|| DocumentError::unknown_shape(shape_name, endpoint.shape.span()))?;
    diagram
        .anchor_by_name(shape, endpoint.anchor.get_ref())
        .ok_or_else(|| {
            DocumentError::unknown_anchor(
                shape_name,
                endpoint.anchor.get_ref(),
                endpoint.anchor.span(),
            )
        })
}

#[derive(Serialize)]
struct OutDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    router: Option<&'a RouterConfig>,
    shapes: Vec<OutShape<'a>>,
    connections: Vec<OutConnection<'a>>,
}

#[derive(Serialize)]
struct OutShape<'a> {
    id: &'a str,
    bounds: Bounds,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    anchors: Vec<OutAnchor<'a>>,
}

#[derive(Serialize)]
struct OutAnchor<'a> {
    id: &'a str,
    offset: Point,
}

#[derive(Serialize)]
struct OutEndpoint<'a> {
    shape: &'a str,
    anchor: &'a str,
}

#[derive(Serialize)]
struct OutConnection<'a> {
    id: &'a str,
    kind: ConnectionKind,
    force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moved: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<usize>,
    source: OutEndpoint<'a>,
    target: OutEndpoint<'a>,
    bendpoints: &'a [Point],
}

/// Serialize a diagram back into document form
pub fn write_document(
    diagram: &Diagram,
    router: Option<&RouterConfig>,
) -> Result<String, toml::ser::Error> {
    let endpoint = |anchor| {
        let anchor = diagram.anchor(anchor);
        OutEndpoint {
            shape: anchor
                .and_then(|a| diagram.shape(a.shape))
                .map_or("", |s| s.name.as_str()),
            anchor: anchor.map_or("", |a| a.name.as_str()),
        }
    };

    let shapes = diagram
        .shapes()
        .map(|(_, shape)| OutShape {
            id: &shape.name,
            bounds: shape.bounds,
            anchors: shape
                .fixed_anchors()
                .iter()
                .filter_map(|&id| diagram.anchor(id))
                .filter_map(|anchor| match anchor.kind {
                    crate::model::AnchorKind::Fixed { offset } => Some(OutAnchor {
                        id: &anchor.name,
                        offset,
                    }),
                    crate::model::AnchorKind::Boundary(_) => None,
                })
                .collect(),
        })
        .collect();

    let connections = diagram
        .connections()
        .map(|(_, c)| OutConnection {
            id: &c.name,
            kind: c.kind,
            force: c.force_routing,
            moved: c.hints.moved,
            added: c.hints.added,
            source: endpoint(c.start),
            target: endpoint(c.end),
            bendpoints: &c.bendpoints,
        })
        .collect();

    toml::to_string(&OutDocument {
        router,
        shapes,
        connections,
    })
}
