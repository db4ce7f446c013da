//! Asset extraction command
//!
//! This module implements the command for extracting a container's
//! assets into an output directory. The command is the reference
//! caller of the pipeline: the core never touches storage, all
//! filesystem writes happen here.

use clap::ArgMatches;
use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::api::AssetKit;
use crate::catalog::descriptor::{AssetDescriptor, AssetPayload};
use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::commands::command_traits::Command;
use crate::extractor::{parse_mode, ExtractionOutcome, ProgressObserver, RunConfiguration};
use crate::utils::logger::Logger;
use crate::utils::ProgressTracker;

/// Subdirectory receiving thumbnail previews in full-mode runs
const THUMBNAIL_DIRECTORY: &str = "_thumbnails";

/// Progress observer driving the CLI progress bar
struct BarObserver {
    tracker: ProgressTracker,
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, fraction: f64) {
        self.tracker.set_fraction(fraction);
    }
}

/// Command for extracting container assets to a directory
pub struct ExtractCommand<'a> {
    /// Path to the input container
    input_file: String,
    /// Directory receiving the extracted assets
    output_dir: String,
    /// Optional TOML profile path
    profile: Option<String>,
    /// Optional thumbnail bounding box as "WxH"
    thumbnail_size: Option<String>,
    /// Whether to run resource-constrained
    constrained: bool,
    /// Optional item cap for constrained runs
    max_items: Option<usize>,
    /// Whether to keep internally-packed placeholder assets
    include_packed: bool,
    /// Optional explicit catalog mode
    mode: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CatalogResult<Self> {
        info!("Creating new extract command from arguments");

        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CatalogError::GenericError("Missing input container".to_string()))?
            .clone();
        info!("Input container: {}", input_file);

        let output_dir = args.get_one::<String>("output")
            .ok_or_else(|| CatalogError::GenericError("Missing output directory for extraction".to_string()))?
            .clone();
        info!("Output directory: {}", output_dir);

        let profile = args.get_one::<String>("profile").cloned();
        info!("Profile: {:?}", profile);

        let thumbnail_size = args.get_one::<String>("thumbnail-size").cloned();
        info!("Thumbnail size: {:?}", thumbnail_size);

        let constrained = args.get_flag("constrained");
        info!("Resource-constrained mode: {}", constrained);

        let max_items = match args.get_one::<String>("max-items") {
            Some(raw) => Some(raw.parse::<usize>()
                .map_err(|_| CatalogError::GenericError(format!("Invalid item cap: {}", raw)))?),
            None => None,
        };
        info!("Item cap: {:?}", max_items);

        let include_packed = args.get_flag("include-packed");
        info!("Include packed assets: {}", include_packed);

        let mode = args.get_one::<String>("mode").cloned();
        info!("Mode override: {:?}", mode);

        Ok(ExtractCommand {
            input_file,
            output_dir,
            profile,
            thumbnail_size,
            constrained,
            max_items,
            include_packed,
            mode,
            logger,
        })
    }

    /// Build the run configuration from profile and flags
    ///
    /// A profile file provides the baseline; explicit flags override
    /// individual fields on top of it.
    fn build_configuration(&self) -> CatalogResult<RunConfiguration> {
        let mut config = match &self.profile {
            Some(path) => RunConfiguration::from_toml_file(path)?,
            None => RunConfiguration::default(),
        };

        if let Some(raw) = &self.thumbnail_size {
            let (width, height) = parse_thumbnail_size(raw)?;
            config.thumbnail_width = width;
            config.thumbnail_height = height;
        }
        if self.constrained {
            config.resource_constrained = true;
        }
        if self.max_items.is_some() {
            config.max_item_count = self.max_items;
        }
        if self.include_packed {
            config.ignore_packed_assets = false;
        }
        if let Some(name) = &self.mode {
            config.mode_override = Some(parse_mode(name)?);
        }

        Ok(config)
    }

    /// Write one descriptor's bytes into the output directory
    fn write_descriptor(&self, dir: &Path, descriptor: &AssetDescriptor) -> CatalogResult<()> {
        let target = dir.join(&descriptor.filename);

        match &descriptor.payload {
            AssetPayload::Image { image, encoded } => match encoded {
                Some(bytes) => fs::write(&target, bytes)?,
                // Constrained runs carry no encoded bytes, so the
                // caller re-encodes the raster itself
                None => image.save(&target).map_err(|e| CatalogError::GenericError(
                    format!("Failed to save {}: {}", target.display(), e)))?,
            },
            AssetPayload::Document { data, .. } => fs::write(&target, data)?,
        }

        if let Some(thumbnail) = &descriptor.thumbnail {
            let thumbnail_dir = dir.join(THUMBNAIL_DIRECTORY);
            fs::create_dir_all(&thumbnail_dir)?;

            let mut thumbnail_name = descriptor.filename.clone();
            if !thumbnail_name.to_lowercase().ends_with(".png") {
                thumbnail_name.push_str(".png");
            }
            thumbnail.save(thumbnail_dir.join(&thumbnail_name))
                .map_err(|e| CatalogError::GenericError(
                    format!("Failed to save thumbnail {}: {}", thumbnail_name, e)))?;
        }

        Ok(())
    }

    /// Materialize the whole outcome into the output directory
    fn write_outcome(&self, outcome: &ExtractionOutcome) -> CatalogResult<()> {
        let dir = Path::new(&self.output_dir);
        fs::create_dir_all(dir)?;

        let mut written = 0usize;
        for descriptor in &outcome.descriptors {
            match self.write_descriptor(dir, descriptor) {
                Ok(()) => written += 1,
                Err(e) => warn!("Failed to write {}: {}", descriptor.filename, e),
            }
        }

        info!("Wrote {} of {} assets to {}", written, outcome.descriptors.len(), self.output_dir);
        self.logger.log(&format!("Wrote {} assets to {}", written, self.output_dir))?;
        Ok(())
    }
}

/// Parse a "WxH" thumbnail bounding box argument
fn parse_thumbnail_size(raw: &str) -> CatalogResult<(u32, u32)> {
    let Some((width, height)) = raw.split_once('x') else {
        return Err(CatalogError::GenericError(format!("Invalid thumbnail size: {}", raw)));
    };

    let width = width.trim().parse::<u32>()
        .map_err(|_| CatalogError::GenericError(format!("Invalid thumbnail width: {}", raw)))?;
    let height = height.trim().parse::<u32>()
        .map_err(|_| CatalogError::GenericError(format!("Invalid thumbnail height: {}", raw)))?;

    Ok((width.max(1), height.max(1)))
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> CatalogResult<()> {
        info!("Executing extract command for {}", self.input_file);

        let config = self.build_configuration()?;
        info!("Run configuration: {:?}", config);

        let api = AssetKit::new(Some("assetkit.log"))?;

        let observer = BarObserver {
            tracker: ProgressTracker::new(100, "Extracting assets"),
        };

        let outcome = match api.extract_with_observer(&self.input_file, config, &observer) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Extraction failed: {}", e);
                return Err(e);
            }
        };
        observer.tracker.finish();

        if outcome.cancelled {
            println!("Extraction cancelled after {} assets", outcome.descriptors.len());
        } else {
            println!("Extracted {} assets", outcome.descriptors.len());
        }

        self.write_outcome(&outcome)
    }
}
