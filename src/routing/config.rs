//! Configuration for the connection router

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tuning constants for connection routing.
///
/// The defaults match the geometry of existing diagrams; changing them moves
/// routes that were already committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Maximum number of route-calculation passes per connection
    pub max_passes: usize,

    /// A bendpoint this close to an endpoint is skipped when snapping anchors
    pub snap_distance: f64,

    /// Distance between a shape and its self-loop
    pub loop_clearance: i32,

    /// A hint point must lie this far outside a shape to stretch its self-loop
    pub hint_tolerance: i32,

    /// Jog added per coincident sibling connection
    pub stack_offset: i32,

    /// Whether coincident connections are separated at all
    pub separate_stacked: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_passes: 4,
            snap_distance: 10.0,
            loop_clearance: 20,
            hint_tolerance: 2,
            stack_offset: 10,
            separate_stacked: true,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string; missing keys keep defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the maximum number of routing passes (at least one)
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes.max(1);
        self
    }

    /// Set the anchor snap distance
    pub fn with_snap_distance(mut self, distance: f64) -> Self {
        self.snap_distance = distance;
        self
    }

    /// Set the self-loop clearance
    pub fn with_loop_clearance(mut self, clearance: i32) -> Self {
        self.loop_clearance = clearance;
        self
    }

    /// Set the per-sibling stacking offset
    pub fn with_stack_offset(mut self, offset: i32) -> Self {
        self.stack_offset = offset;
        self
    }

    /// Enable or disable separation of stacked connections
    pub fn with_stack_separation(mut self, enabled: bool) -> Self {
        self.separate_stacked = enabled;
        self
    }
}
