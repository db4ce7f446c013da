pub mod catalog;
pub mod utils;
pub mod extractor;
pub mod commands;
pub mod api;

pub use crate::api::AssetKit;

pub use catalog::{AssetDescriptor, AssetKind, AssetPayload, CatalogMode, RenditionSource};
pub use extractor::{CancellationToken, ExtractionOrchestrator, ExtractionOutcome, RunConfiguration};
