//! Descriptor materialization
//!
//! Builds the immutable output descriptors out of classified payloads.
//! Per-item failures here are soft: they are logged, the item is
//! skipped and still counted as loaded, and the run continues.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use log::{debug, warn};

use crate::catalog::descriptor::AssetDescriptor;
use crate::extractor::config::RunConfiguration;
use crate::utils::thumbnail_utils;

/// Build an image descriptor from a raster payload
///
/// In resource-constrained runs the descriptor carries the decoded
/// raster only. In full runs the raster is encoded to lossless PNG,
/// the encoded bytes are decoded back into a canonical image, and a
/// thumbnail is synthesized; an empty or failed encode is a soft
/// failure.
///
/// # Arguments
/// * `name` - Logical asset name
/// * `filename` - Unique output filename
/// * `image` - Decoded raster payload
/// * `config` - Run configuration
///
/// # Returns
/// The descriptor, or None on a soft failure (already logged)
pub fn materialize_image(name: &str, filename: String, image: DynamicImage,
                         config: &RunConfiguration) -> Option<AssetDescriptor> {
    if config.resource_constrained {
        debug!("Materializing {} without encode/thumbnail (resource-constrained)", name);
        return Some(AssetDescriptor::image(name, filename, image, None, None));
    }

    let mut encoded = Vec::new();
    if let Err(e) = image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png) {
        warn!("Failed to encode {}: {}", name, e);
        return None;
    }
    if encoded.is_empty() {
        warn!("Encoder produced no bytes for {}", name);
        return None;
    }

    // Round-trip through the encoded bytes to normalize the raster
    // representation
    let canonical = match image::load_from_memory(&encoded) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to decode encoded bytes for {}: {}", name, e);
            return None;
        }
    };

    let thumbnail = thumbnail_utils::constrain(
        &canonical, config.thumbnail_width, config.thumbnail_height);

    Some(AssetDescriptor::image(name, filename, canonical, Some(encoded), Some(thumbnail)))
}

/// Build a document descriptor from an opaque payload
///
/// Resource-constrained runs omit the placeholder thumbnail; full runs
/// synthesize one from the detected extension.
///
/// # Arguments
/// * `name` - Logical asset name
/// * `filename` - Unique output filename
/// * `extension` - Detected extension, without the leading dot
/// * `data` - Raw byte payload
/// * `config` - Run configuration
pub fn materialize_document(name: &str, filename: String, extension: String,
                            data: Vec<u8>, config: &RunConfiguration) -> AssetDescriptor {
    let thumbnail = if config.resource_constrained {
        None
    } else {
        Some(thumbnail_utils::document_placeholder(
            &extension, config.thumbnail_width, config.thumbnail_height))
    };

    AssetDescriptor::document(name, filename, data, extension, thumbnail)
}
