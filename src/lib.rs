//! Bendpoint Router - orthogonal connection routing for diagram editors
//!
//! This library keeps connection routes consistent while shapes and
//! bendpoints are edited: it drops bendpoints swallowed by shapes, snaps
//! boundary anchors to the side a route actually leaves from, separates
//! coincident connections, routes self-loops and collapses collinear points.
//!
//! # Example
//!
//! ```rust
//! use bendpoint_router::route_document;
//!
//! let routed = route_document(r#"
//! [[shapes]]
//! id = "a"
//! bounds = { x = 0, y = 0, width = 100, height = 60 }
//!
//! [[shapes]]
//! id = "b"
//! bounds = { x = 300, y = 0, width = 100, height = 60 }
//!
//! [[connections]]
//! id = "flow"
//! source = { shape = "a", anchor = "right" }
//! target = { shape = "b", anchor = "left" }
//! bendpoints = [{ x = 50, y = 30 }]
//! "#).unwrap();
//!
//! assert!(routed.contains("flow"));
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod routing;

pub use document::{parse_document, write_document, Document};
pub use error::DocumentError;
pub use model::{
    Bounds, Connection, ConnectionId, Diagram, DiagramInterchange, Geometry, InterchangeSink,
    Point,
};
pub use routing::{ConfigError, RouteError, RouteOutcome, Router, RouterConfig};

use serde::Serialize;
use thiserror::Error;

use model::InterchangeEdge;

/// Errors that can occur while routing a document
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be loaded
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Routing rejected a connection or shape id
    #[error("routing error: {0}")]
    Route(#[from] RouteError),

    /// A router configuration file could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The routed document could not be written
    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A connection was selected by a name the document does not define
    #[error("no connection named '{0}'")]
    UnknownConnection(String),
}

/// Options for routing a whole document
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Router settings; when unset the document's `[router]` table is used
    pub router: Option<RouterConfig>,
    /// Connections to route by name; empty routes all of them
    pub connections: Vec<String>,
    /// Reroute selected connections even where manual shaping is preserved
    pub force: bool,
}

impl PipelineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the router settings
    pub fn with_router(mut self, config: RouterConfig) -> Self {
        self.router = Some(config);
        self
    }

    /// Route only the named connection (may be called repeatedly)
    pub fn with_connection(mut self, name: impl Into<String>) -> Self {
        self.connections.push(name.into());
        self
    }

    /// Enable or disable forced rerouting
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// A document after routing, with the interchange edges it produced
#[derive(Debug, Clone)]
pub struct RoutedDocument {
    pub document: Document,
    pub interchange: DiagramInterchange,
    /// Names of the connections that were rewritten
    pub changed: Vec<String>,
}

#[derive(Serialize)]
struct InterchangeOutput<'a> {
    edges: Vec<&'a InterchangeEdge>,
}

impl RoutedDocument {
    /// Serialize the routed diagram as a TOML document
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        write_document(&self.document.diagram, self.document.router.as_ref())
    }

    /// Serialize the interchange edges synchronized during routing
    pub fn interchange_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&InterchangeOutput {
            edges: self.interchange.edges().collect(),
        })
    }
}

/// Route every connection of a TOML document and return the routed document
pub fn route_document(source: &str) -> Result<String, Error> {
    Ok(route_document_with_config(source, &PipelineConfig::default())?.to_toml()?)
}

/// Route a TOML document with custom configuration
///
/// # Example
///
/// ```rust
/// use bendpoint_router::{route_document_with_config, PipelineConfig, RouterConfig};
///
/// let source = r#"
/// [[shapes]]
/// id = "task"
/// bounds = { x = 0, y = 0, width = 100, height = 60 }
///
/// [[connections]]
/// id = "retry"
/// source = { shape = "task", anchor = "right" }
/// target = { shape = "task", anchor = "top" }
/// "#;
///
/// let config = PipelineConfig::new().with_router(RouterConfig::new().with_loop_clearance(30));
/// let routed = route_document_with_config(source, &config).unwrap();
/// assert_eq!(routed.changed, vec!["retry".to_string()]);
/// ```
pub fn route_document_with_config(
    source: &str,
    config: &PipelineConfig,
) -> Result<RoutedDocument, Error> {
    let mut document = parse_document(source)?;
    let router_config = config
        .router
        .clone()
        .or_else(|| document.router.clone())
        .unwrap_or_default();
    let router = Router::new(router_config);

    let selected = if config.connections.is_empty() {
        document.diagram.connection_ids()
    } else {
        config
            .connections
            .iter()
            .map(|name| {
                document
                    .diagram
                    .connection_by_name(name)
                    .ok_or_else(|| Error::UnknownConnection(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut interchange = DiagramInterchange::new();
    let mut changed = Vec::new();
    for id in selected {
        // Forcing applies to this run only; the stored flag is written back untouched
        let stored = document.diagram.connection(id).map(|c| c.force_routing);
        if config.force {
            if let Some(connection) = document.diagram.connection_mut(id) {
                connection.force_routing = true;
            }
        }
        let routed = router.route(&mut document.diagram, id, &mut interchange);
        if let (Some(stored), Some(connection)) = (stored, document.diagram.connection_mut(id)) {
            connection.force_routing = stored;
        }
        if routed? {
            if let Some(connection) = document.diagram.connection(id) {
                changed.push(connection.name.clone());
            }
        }
    }
    tracing::debug!(changed = changed.len(), "document routed");

    Ok(RoutedDocument {
        document,
        interchange,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TASKS: &str = r#"
[[shapes]]
id = "a"
bounds = { x = 0, y = 0, width = 100, height = 60 }

[[shapes]]
id = "b"
bounds = { x = 300, y = 0, width = 100, height = 60 }

[[connections]]
id = "flow"
source = { shape = "a", anchor = "right" }
target = { shape = "b", anchor = "left" }
bendpoints = [{ x = 50, y = 30 }]
"#;

    #[test]
    fn test_route_document_drops_contained_bendpoint() {
        let routed = route_document_with_config(TWO_TASKS, &PipelineConfig::default()).unwrap();
        assert_eq!(routed.changed, vec!["flow".to_string()]);
        let diagram = &routed.document.diagram;
        let flow = diagram.connection_by_name("flow").unwrap();
        assert!(diagram.connection(flow).unwrap().bendpoints.is_empty());
        assert_eq!(routed.interchange.sync_count(), 1);
    }

    #[test]
    fn test_routed_output_is_stable() {
        let first = route_document(TWO_TASKS).unwrap();
        let routed = route_document_with_config(&first, &PipelineConfig::default()).unwrap();
        assert!(routed.changed.is_empty());
        assert_eq!(routed.interchange.sync_count(), 0);
    }

    #[test]
    fn test_unknown_connection_name() {
        let config = PipelineConfig::new().with_connection("missing");
        let err = route_document_with_config(TWO_TASKS, &config).unwrap_err();
        assert!(matches!(err, Error::UnknownConnection(ref name) if name == "missing"));
    }

    #[test]
    fn test_document_error_is_wrapped() {
        let err = route_document("[[shapes]]\nid = 3\n").unwrap_err();
        assert!(matches!(err, Error::Document(DocumentError::Syntax { .. })));
    }

    #[test]
    fn test_interchange_output_lists_edges() {
        let routed = route_document_with_config(TWO_TASKS, &PipelineConfig::default()).unwrap();
        let text = routed.interchange_toml().unwrap();
        assert!(text.contains("flow"));
        assert!(text.contains("waypoints"));
    }
}
