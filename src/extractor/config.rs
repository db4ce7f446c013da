//! Run configuration
//!
//! Caller-supplied knobs for one extraction run. The configuration is
//! immutable once the run starts; the CLI can load a profile from a
//! TOML file and override individual fields from flags.

use std::fs;

use log::info;

use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::catalog::mode::CatalogMode;

/// Default thumbnail bounding box width
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 256;
/// Default thumbnail bounding box height
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 256;

/// Caller-supplied configuration for one extraction run
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    /// Thumbnail bounding box width
    pub thumbnail_width: u32,
    /// Thumbnail bounding box height
    pub thumbnail_height: u32,
    /// Degraded mode for tight memory/CPU budgets: bounds item count
    /// and skips thumbnail/encode work
    pub resource_constrained: bool,
    /// Maximum item count; only meaningful when resource-constrained
    pub max_item_count: Option<usize>,
    /// Drop assets matching the internally-packed placeholder pattern
    pub ignore_packed_assets: bool,
    /// Explicit catalog mode, bypassing the detection heuristic
    pub mode_override: Option<CatalogMode>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        RunConfiguration {
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            resource_constrained: false,
            max_item_count: None,
            ignore_packed_assets: true,
            mode_override: None,
        }
    }
}

impl RunConfiguration {
    /// Create a configuration with default values
    pub fn new() -> Self {
        RunConfiguration::default()
    }

    /// Total item count for a run over the given enumeration size
    ///
    /// The count is capped to `max_item_count` only when the run is
    /// resource-constrained.
    pub fn effective_total(&self, entry_count: usize) -> usize {
        if self.resource_constrained {
            if let Some(cap) = self.max_item_count {
                return entry_count.min(cap);
            }
        }
        entry_count
    }

    /// Load a configuration profile from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the profile file
    ///
    /// # Returns
    /// The parsed configuration or an error
    pub fn from_toml_file(path: &str) -> CatalogResult<Self> {
        info!("Loading extraction profile from {}", path);
        let content = fs::read_to_string(path)?;
        RunConfiguration::from_toml_str(&content)
    }

    /// Parse a configuration profile from TOML text
    ///
    /// Recognized keys: `thumbnail_width`, `thumbnail_height`,
    /// `resource_constrained`, `max_item_count`,
    /// `ignore_packed_assets`, `mode` ("catalog" or "store").
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e| CatalogError::GenericError(format!("Invalid profile TOML: {}", e)))?;

        let mut config = RunConfiguration::default();

        if let Some(width) = value.get("thumbnail_width").and_then(|v| v.as_integer()) {
            config.thumbnail_width = width.max(1) as u32;
        }
        if let Some(height) = value.get("thumbnail_height").and_then(|v| v.as_integer()) {
            config.thumbnail_height = height.max(1) as u32;
        }
        if let Some(constrained) = value.get("resource_constrained").and_then(|v| v.as_bool()) {
            config.resource_constrained = constrained;
        }
        if let Some(cap) = value.get("max_item_count").and_then(|v| v.as_integer()) {
            config.max_item_count = Some(cap.max(0) as usize);
        }
        if let Some(ignore) = value.get("ignore_packed_assets").and_then(|v| v.as_bool()) {
            config.ignore_packed_assets = ignore;
        }
        if let Some(mode) = value.get("mode").and_then(|v| v.as_str()) {
            config.mode_override = Some(parse_mode(mode)?);
        }

        Ok(config)
    }
}

/// Parse a catalog mode name as used in profiles and CLI flags
pub fn parse_mode(name: &str) -> CatalogResult<CatalogMode> {
    match name.to_lowercase().as_str() {
        "catalog" | "flat" => Ok(CatalogMode::FlatCatalog),
        "store" | "theme-store" => Ok(CatalogMode::ThemeStore),
        other => Err(CatalogError::GenericError(format!("Unknown catalog mode: {}", other))),
    }
}
