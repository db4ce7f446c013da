//! Asset catalog model and rendition source boundary
//!
//! This module provides the data model for extracted assets, the
//! rendition source trait that hides the compiled container decoder,
//! and the catalog mode selection logic.

pub mod errors;
pub mod rendition;
pub mod descriptor;
pub mod mode;
pub mod source;
pub mod bundle;
#[cfg(test)]
mod tests;

pub use errors::{CatalogError, CatalogResult};
pub use rendition::{GlyphSize, GlyphWeight, Layer, PresentationState, Rendition, RenditionKey,
                    RenderingMode, Scale, VectorDocument};
pub use descriptor::{AssetDescriptor, AssetKind, AssetPayload};
pub use mode::{CatalogMode, RESTRICTED_FORMAT_MARKER};
pub use source::{open_container, MemorySource, RenditionSource};
pub use bundle::BundleSource;
