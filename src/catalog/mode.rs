//! Catalog mode selection
//!
//! A compiled container exposes its contents through one of two
//! incompatible enumeration models: a flat name-to-image lookup or a
//! keyed rendition store. The selector decides once per run which
//! traversal applies, and rejects restricted-format containers before
//! any extraction work happens.

use log::{debug, info};

use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::catalog::source::RenditionSource;

/// Marker identifying a restricted ("pro") container variant
///
/// Containers carrying this token are detected and rejected, never
/// decoded. The token is treated as opaque bytes.
pub const RESTRICTED_FORMAT_MARKER: [u8; 18] = *b"ProThemeDefinition";

/// Enumeration model of an opened container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    /// Flat name-to-image lookup ("modern" catalog)
    FlatCatalog,
    /// Keyed rendition store (legacy encoding)
    ThemeStore,
}

impl CatalogMode {
    /// Human-readable mode name for summaries and logs
    pub fn describe(&self) -> &'static str {
        match self {
            CatalogMode::FlatCatalog => "flat catalog",
            CatalogMode::ThemeStore => "theme store",
        }
    }
}

/// Check raw container bytes for the restricted-format marker
pub fn contains_restricted_marker(bytes: &[u8]) -> bool {
    bytes
        .windows(RESTRICTED_FORMAT_MARKER.len())
        .any(|window| window == RESTRICTED_FORMAT_MARKER)
}

/// Reject a container whose raw bytes carry the restricted marker
///
/// # Arguments
/// * `bytes` - Raw container bytes, scanned as-is
///
/// # Returns
/// Ok when the container is not restricted, `UnsupportedRestrictedFormat`
/// otherwise
pub fn reject_restricted(bytes: &[u8]) -> CatalogResult<()> {
    if contains_restricted_marker(bytes) {
        info!("Container matched the restricted-format marker, rejecting");
        return Err(CatalogError::UnsupportedRestrictedFormat);
    }
    Ok(())
}

/// Detect the enumeration model of an opened source
///
/// A source that exposes no directly addressable image names, or that
/// cannot answer a name+scale image lookup, is treated as a theme
/// store; anything else is a flat catalog.
pub fn detect_mode(source: &dyn RenditionSource) -> CatalogMode {
    if source.image_names().is_empty() || !source.supports_name_lookup() {
        debug!("Source exposes no name lookup, treating container as a theme store");
        CatalogMode::ThemeStore
    } else {
        debug!("Source answers name lookups, treating container as a flat catalog");
        CatalogMode::FlatCatalog
    }
}

/// Select the traversal mode for a run
///
/// An explicit configuration override bypasses the heuristic.
pub fn select_mode(source: &dyn RenditionSource, override_mode: Option<CatalogMode>) -> CatalogMode {
    match override_mode {
        Some(mode) => {
            info!("Catalog mode overridden by configuration: {}", mode.describe());
            mode
        }
        None => {
            let mode = detect_mode(source);
            info!("Detected catalog mode: {}", mode.describe());
            mode
        }
    }
}
