//! Flat-catalog traversal
//!
//! Walks every logical name in source order and requests up to three
//! scale variants per name, in ascending scale order. Every variant is
//! dispatched through classification and materialization; per-variant
//! failures are logged and counted, never fatal.

use log::{debug, info, warn};

use crate::catalog::errors::CatalogResult;
use crate::catalog::rendition::Scale;
use crate::catalog::source::RenditionSource;
use crate::extractor::aggregator::ResultAggregator;
use crate::extractor::classifier::{classify_catalog_variant, ExtractionPath};
use crate::extractor::config::RunConfiguration;
use crate::extractor::events::ProgressObserver;
use crate::extractor::materialize::{materialize_document, materialize_image};
use crate::extractor::state::RunState;
use crate::extractor::traversal::TraversalStrategy;
use crate::utils::content_type_utils::extension_for;
use crate::utils::filename_utils::{clean_asset_name, document_filename};

/// Traversal over the flat name-to-image surface
pub struct FlatCatalogStrategy;

impl FlatCatalogStrategy {
    /// Create a new strategy instance
    pub fn new() -> Self {
        FlatCatalogStrategy
    }

    /// Process one resolved variant of a logical name
    fn process_variant(&self,
                       source: &dyn RenditionSource,
                       name: &str,
                       scale: Scale,
                       path: ExtractionPath,
                       config: &RunConfiguration,
                       state: &mut RunState,
                       aggregator: &mut ResultAggregator) {
        match path {
            ExtractionPath::Raster(image) => {
                // Under resource constraints a low-density raster is
                // redundant once any higher-density variant exists.
                // The skip leaves the item budget untouched, so the
                // higher-density sibling still fits into it.
                if config.resource_constrained
                    && scale.factor() < 2
                    && state.container_has_high_density(source)
                {
                    debug!("Skipping low-density variant {}{}", name, scale.suffix());
                    return;
                }

                let requested = format!("{}{}.png", clean_asset_name(name), scale.suffix());
                let filename = state.unique_filename(&requested);

                // Cancellation is polled before the encode work starts
                if state.is_cancelled() {
                    return;
                }
                match materialize_image(name, filename, image, config) {
                    Some(descriptor) => {
                        if state.is_cancelled() {
                            return;
                        }
                        aggregator.push(descriptor);
                        state.mark_loaded();
                    }
                    // Soft failure, already logged; the item still counts
                    None => state.mark_loaded(),
                }
            }
            ExtractionPath::Vector(vector) => {
                let requested = format!("{}.pdf", clean_asset_name(name));
                let filename = state.unique_filename(&requested);
                if state.is_cancelled() {
                    return;
                }
                let descriptor = materialize_document(
                    name, filename, "pdf".to_string(), vector.data, config);
                aggregator.push(descriptor);
                state.mark_loaded();
            }
            ExtractionPath::Data(data) => {
                let extension = extension_for(&data, name);
                let filename = state.unique_filename(&document_filename(name, &extension));
                if state.is_cancelled() {
                    return;
                }
                let descriptor = materialize_document(name, filename, extension, data, config);
                aggregator.push(descriptor);
                state.mark_loaded();
            }
            ExtractionPath::Skip(reason) => {
                debug!("Skipping {}{}: {}", name, scale.suffix(), reason.describe());
                state.mark_loaded();
            }
        }
    }
}

impl TraversalStrategy for FlatCatalogStrategy {
    fn traverse(&mut self,
                source: &dyn RenditionSource,
                config: &RunConfiguration,
                state: &mut RunState,
                aggregator: &mut ResultAggregator,
                observer: &dyn ProgressObserver) -> CatalogResult<()> {
        let names = source.image_names();
        info!("Traversing flat catalog: {} logical names, {} item budget",
              names.len(), state.total_count());

        for name in &names {
            if state.is_cancelled() {
                info!("Cancellation observed, stopping flat traversal");
                return Ok(());
            }

            if config.resource_constrained && state.reached_capacity() {
                info!("Item budget consumed, stopping flat traversal early");
                break;
            }

            observer.on_progress(state.progress());

            for scale in Scale::all() {
                if state.is_cancelled() {
                    return Ok(());
                }
                if config.resource_constrained && state.reached_capacity() {
                    break;
                }

                let rendition = match source.variant(name, scale) {
                    Ok(Some(rendition)) => rendition,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("Skipping {}{}: {}", name, scale.suffix(), e);
                        state.mark_loaded();
                        continue;
                    }
                };

                let path = classify_catalog_variant(rendition);
                self.process_variant(source, name, scale, path, config, state, aggregator);
            }
        }

        Ok(())
    }
}
