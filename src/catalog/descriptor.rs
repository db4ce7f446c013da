//! Asset descriptor output model
//!
//! An AssetDescriptor is the unit of output of an extraction run: one
//! named, self-contained item usable outside the container's native
//! runtime. Descriptors are created exactly once per successfully
//! processed rendition, appended to the result aggregator, and never
//! mutated afterward.

use image::DynamicImage;

/// Kind of an extracted asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Raster image asset
    Image,
    /// Opaque document asset (data payload with a detected extension)
    Document,
}

/// Payload of an extracted asset
pub enum AssetPayload {
    /// Raster image payload
    Image {
        /// Canonical decoded raster
        image: DynamicImage,
        /// Lossless encoded bytes; absent in resource-constrained runs
        encoded: Option<Vec<u8>>,
    },
    /// Opaque document payload
    Document {
        /// Raw byte payload as yielded by the source
        data: Vec<u8>,
        /// Detected file extension, without the leading dot
        extension: String,
    },
}

/// The immutable output record for one successfully extracted asset
pub struct AssetDescriptor {
    /// Logical asset name from the source
    pub name: String,
    /// Output filename, unique across the run
    pub filename: String,
    /// Asset payload (image or document)
    pub payload: AssetPayload,
    /// Bounded-size preview raster; absent in resource-constrained runs
    pub thumbnail: Option<DynamicImage>,
}

impl AssetDescriptor {
    /// Create an image descriptor
    ///
    /// # Arguments
    /// * `name` - Logical asset name
    /// * `filename` - Unique output filename
    /// * `image` - Canonical decoded raster
    /// * `encoded` - Encoded bytes, when produced
    /// * `thumbnail` - Preview raster, when produced
    pub fn image(name: &str, filename: String, image: DynamicImage,
                 encoded: Option<Vec<u8>>, thumbnail: Option<DynamicImage>) -> Self {
        AssetDescriptor {
            name: name.to_string(),
            filename,
            payload: AssetPayload::Image { image, encoded },
            thumbnail,
        }
    }

    /// Create a document descriptor
    ///
    /// # Arguments
    /// * `name` - Logical asset name
    /// * `filename` - Unique output filename
    /// * `data` - Raw byte payload
    /// * `extension` - Detected extension, without the leading dot
    /// * `thumbnail` - Placeholder preview, when produced
    pub fn document(name: &str, filename: String, data: Vec<u8>,
                    extension: String, thumbnail: Option<DynamicImage>) -> Self {
        AssetDescriptor {
            name: name.to_string(),
            filename,
            payload: AssetPayload::Document { data, extension },
            thumbnail,
        }
    }

    /// Kind of this asset
    pub fn kind(&self) -> AssetKind {
        match self.payload {
            AssetPayload::Image { .. } => AssetKind::Image,
            AssetPayload::Document { .. } => AssetKind::Document,
        }
    }

    /// Bytes ready to be materialized to storage by a caller, if any
    ///
    /// Images carry encoded bytes only in full (non-constrained) runs;
    /// documents always carry their raw payload.
    pub fn output_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            AssetPayload::Image { encoded, .. } => encoded.as_deref(),
            AssetPayload::Document { data, .. } => Some(data.as_slice()),
        }
    }
}
