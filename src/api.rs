use log::info;

use crate::catalog::descriptor::AssetKind;
use crate::catalog::errors::CatalogResult;
use crate::catalog::mode::{detect_mode, CatalogMode};
use crate::catalog::rendition::Scale;
use crate::catalog::source::{open_container, RenditionSource};
use crate::extractor::{
    ExtractionOrchestrator, ExtractionOutcome, NullObserver, ProgressObserver, RunConfiguration,
};
use crate::utils::logger::Logger;

/// Main interface to the AssetKit library
pub struct AssetKit {
    logger: Logger,
}

impl AssetKit {
    /// Create a new AssetKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "assetkit.log"
    ///
    /// # Returns
    /// An AssetKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> CatalogResult<Self> {
        let log_path = log_file.unwrap_or("assetkit.log");
        let logger = Logger::new(log_path)?;
        Ok(AssetKit { logger })
    }

    /// Analyze a container and return information about its contents
    ///
    /// Opens the container, detects its enumeration model, and lists
    /// the addressable entries without materializing any of them.
    ///
    /// # Arguments
    /// * `input_path` - Path to the container to analyze
    ///
    /// # Returns
    /// String containing analysis information or an error
    pub fn analyze(&self, input_path: &str) -> CatalogResult<String> {
        let source = open_container(input_path)?;
        let mode = detect_mode(source.as_ref());

        let mut result = format!("Catalog Analysis Results:\n");
        result.push_str(&format!("  Mode: {}\n", mode.describe()));

        match mode {
            CatalogMode::FlatCatalog => {
                let names = source.image_names();
                result.push_str(&format!("  Logical names: {}\n", names.len()));

                for name in &names {
                    let mut scales = Vec::new();
                    for scale in Scale::all() {
                        if let Ok(Some(_)) = source.variant(name, scale) {
                            scales.push(format!("{}x", scale.factor()));
                        }
                    }
                    result.push_str(&format!("\n  {} ({})\n", name, scales.join(", ")));
                }
            }
            CatalogMode::ThemeStore => {
                let keys = source.rendition_keys();
                result.push_str(&format!("  Rendition keys: {}\n", keys.len()));

                for key in &keys {
                    result.push_str(&format!("\n  {}\n", key));
                }
            }
        }

        Ok(result)
    }

    /// Detect the enumeration model of a container
    ///
    /// # Arguments
    /// * `input_path` - Path to the container
    ///
    /// # Returns
    /// The detected catalog mode or an error
    pub fn detect_mode(&self, input_path: &str) -> CatalogResult<CatalogMode> {
        let source = open_container(input_path)?;
        Ok(detect_mode(source.as_ref()))
    }

    /// Extract every asset from a container
    ///
    /// # Arguments
    /// * `input_path` - Path to the container
    /// * `config` - Run configuration
    ///
    /// # Returns
    /// The run outcome or a fatal error
    pub fn extract(&self, input_path: &str,
                   config: RunConfiguration) -> CatalogResult<ExtractionOutcome> {
        self.extract_with_observer(input_path, config, &NullObserver)
    }

    /// Extract every asset from a container, reporting progress
    ///
    /// # Arguments
    /// * `input_path` - Path to the container
    /// * `config` - Run configuration
    /// * `observer` - Progress consumer
    ///
    /// # Returns
    /// The run outcome or a fatal error
    pub fn extract_with_observer(&self, input_path: &str, config: RunConfiguration,
                                 observer: &dyn ProgressObserver) -> CatalogResult<ExtractionOutcome> {
        info!("Extracting assets from {}", input_path);

        let mut orchestrator = ExtractionOrchestrator::new(config);
        let outcome = orchestrator.run_container(input_path, observer)?;

        self.log_outcome(&outcome)?;
        Ok(outcome)
    }

    /// Extract every asset from an already-opened rendition source
    ///
    /// This method bypasses container opening, which lets callers plug
    /// in their own decoder backend.
    ///
    /// # Arguments
    /// * `source` - Opened rendition source
    /// * `config` - Run configuration
    /// * `observer` - Progress consumer
    ///
    /// # Returns
    /// The run outcome or a fatal error
    pub fn extract_from_source(&self, source: &dyn RenditionSource, config: RunConfiguration,
                               observer: &dyn ProgressObserver) -> CatalogResult<ExtractionOutcome> {
        let mut orchestrator = ExtractionOrchestrator::new(config);
        let outcome = orchestrator.run(source, observer)?;

        self.log_outcome(&outcome)?;
        Ok(outcome)
    }

    /// Write the run's descriptor listing to the instance log
    fn log_outcome(&self, outcome: &ExtractionOutcome) -> CatalogResult<()> {
        let entries: Vec<(&str, &str, &str)> = outcome
            .descriptors
            .iter()
            .map(|descriptor| {
                let kind = match descriptor.kind() {
                    AssetKind::Image => "image",
                    AssetKind::Document => "document",
                };
                (descriptor.name.as_str(), descriptor.filename.as_str(), kind)
            })
            .collect();

        self.logger.print_descriptor_listing(entries)?;
        Ok(())
    }
}
