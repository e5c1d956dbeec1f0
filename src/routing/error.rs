//! Error types for the router

use thiserror::Error;

use crate::model::{ConnectionId, ShapeId};

/// Errors raised when the router is handed ids the diagram does not know
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown connection #{}", .0.index())]
    UnknownConnection(ConnectionId),

    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),
}

/// Errors that can occur when loading a router configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read router config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse router config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The direction of a route could not be inferred at a point
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no orthogonal direction at point {index}")]
pub struct NonOrthogonal {
    pub index: usize,
}
