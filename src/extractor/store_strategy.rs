//! Theme-store traversal
//!
//! Walks every composite rendition key in source order and resolves it
//! through the store surface. Resolve failures are caught and treated
//! as skipped items so one bad entry never unwinds the run.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::catalog::errors::CatalogResult;
use crate::catalog::rendition::RenditionKey;
use crate::catalog::source::RenditionSource;
use crate::extractor::aggregator::ResultAggregator;
use crate::extractor::classifier::{classify_store_rendition, ExtractionPath};
use crate::extractor::config::RunConfiguration;
use crate::extractor::events::ProgressObserver;
use crate::extractor::materialize::{materialize_document, materialize_image};
use crate::extractor::state::RunState;
use crate::extractor::traversal::TraversalStrategy;
use crate::utils::content_type_utils::extension_for;
use crate::utils::filename_utils::{clean_asset_name, document_filename};

lazy_static! {
    // Internally-packed placeholder assets carry machine-generated
    // names of this shape; they hold no standalone artwork
    static ref PACKED_ASSET_PATTERN: Regex = Regex::new(r"^ZZZZ(?:Packed|Flattened)Asset").unwrap();
}

/// Traversal over the keyed theme-store surface
pub struct ThemeStoreStrategy;

impl ThemeStoreStrategy {
    /// Create a new strategy instance
    pub fn new() -> Self {
        ThemeStoreStrategy
    }

    /// Process one resolved keyed rendition
    fn process_rendition(&self,
                         source: &dyn RenditionSource,
                         key: &RenditionKey,
                         path: ExtractionPath,
                         config: &RunConfiguration,
                         state: &mut RunState,
                         aggregator: &mut ResultAggregator) {
        let cleaned = clean_asset_name(&key.name);

        match path {
            ExtractionPath::Vector(vector) => {
                let requested = format!("{}-{}-{}{}.pdf",
                                        cleaned,
                                        vector.weight.descriptor(),
                                        vector.size.descriptor(),
                                        vector.mode.descriptor());
                let filename = state.unique_filename(&requested);
                if state.is_cancelled() {
                    return;
                }
                let descriptor = materialize_document(
                    &key.name, filename, "pdf".to_string(), vector.data, config);
                aggregator.push(descriptor);
                state.mark_loaded();
            }
            ExtractionPath::Raster(image) => {
                // Low-density skips mirror the flat path: no budget
                // consumed, the higher-density sibling still fits
                if config.resource_constrained
                    && key.scale.factor() < 2
                    && state.container_has_high_density(source)
                {
                    debug!("Skipping low-density rendition {}", key);
                    return;
                }

                if config.ignore_packed_assets && PACKED_ASSET_PATTERN.is_match(&cleaned) {
                    debug!("Dropping internally-packed asset {}", key.name);
                    state.mark_loaded();
                    return;
                }

                let requested = format!("{}{}{}.png",
                                        cleaned, key.scale.suffix(), key.state.suffix());
                let filename = state.unique_filename(&requested);
                if state.is_cancelled() {
                    return;
                }
                match materialize_image(&key.name, filename, image, config) {
                    Some(descriptor) => {
                        if state.is_cancelled() {
                            return;
                        }
                        aggregator.push(descriptor);
                        state.mark_loaded();
                    }
                    None => state.mark_loaded(),
                }
            }
            ExtractionPath::Data(data) => {
                let extension = extension_for(&data, &key.name);
                let filename = state.unique_filename(&document_filename(&key.name, &extension));
                if state.is_cancelled() {
                    return;
                }
                let descriptor = materialize_document(&key.name, filename, extension, data, config);
                aggregator.push(descriptor);
                state.mark_loaded();
            }
            ExtractionPath::Skip(reason) => {
                // Not an error; effect and material entries have no
                // extractable payload
                debug!("Skipping {}: {}", key, reason.describe());
                state.mark_loaded();
            }
        }
    }
}

impl TraversalStrategy for ThemeStoreStrategy {
    fn traverse(&mut self,
                source: &dyn RenditionSource,
                config: &RunConfiguration,
                state: &mut RunState,
                aggregator: &mut ResultAggregator,
                observer: &dyn ProgressObserver) -> CatalogResult<()> {
        let keys = source.rendition_keys();
        info!("Traversing theme store: {} rendition keys, {} item budget",
              keys.len(), state.total_count());

        for key in &keys {
            if state.is_cancelled() {
                info!("Cancellation observed, stopping store traversal");
                return Ok(());
            }

            if config.resource_constrained && state.reached_capacity() {
                info!("Item budget consumed, stopping store traversal early");
                break;
            }

            observer.on_progress(state.progress());

            let rendition = match source.rendition(key) {
                Ok(rendition) => rendition,
                Err(e) => {
                    warn!("Skipping {}: {}", key, e);
                    state.mark_loaded();
                    continue;
                }
            };

            let path = classify_store_rendition(rendition);
            self.process_rendition(source, key, path, config, state, aggregator);
        }

        Ok(())
    }
}
