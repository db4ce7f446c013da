//! Rendition classification
//!
//! Given one raw rendition from the source, decide which extraction
//! path applies: flattenable layer stack, plain raster, vector
//! document, or opaque data. The two enumeration models check the
//! payload fields in different precedence orders, so each traversal
//! has its own entry point.

use image::{imageops, DynamicImage, RgbaImage};

use crate::catalog::rendition::{Layer, Rendition, VectorDocument};

/// Reason a rendition produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Variant carried no decodable image
    NoDecodableImage,
    /// Layered variant with an empty layer stack
    EmptyLayerStack,
    /// Entry carries none of the extractable payloads, likely a
    /// non-visual effect or material definition
    NonVisual,
}

impl SkipReason {
    /// Short label for log lines
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NoDecodableImage => "no decodable image",
            SkipReason::EmptyLayerStack => "empty layer stack",
            SkipReason::NonVisual => "no extractable payload",
        }
    }
}

/// Extraction path chosen for one rendition
pub enum ExtractionPath {
    /// Raster (plain or flattened composite) for image materialization
    Raster(DynamicImage),
    /// Vector document routed to document handling
    Vector(VectorDocument),
    /// Opaque payload routed to document handling
    Data(Vec<u8>),
    /// Nothing extractable; carries the reason for the log line
    Skip(SkipReason),
}

/// Classify a variant from the flat-catalog surface
///
/// Precedence on this path: an opaque data payload routes to document
/// handling before any image handling; a layer stack is flattened into
/// its composite; then the plain raster; anything else is a skip.
pub fn classify_catalog_variant(rendition: Rendition) -> ExtractionPath {
    if rendition.has_data_payload() {
        return ExtractionPath::Data(rendition.data.unwrap_or_default());
    }

    if let Some(layers) = rendition.layers {
        return match flatten_layers(&layers) {
            Some(composite) => ExtractionPath::Raster(composite),
            None => ExtractionPath::Skip(SkipReason::EmptyLayerStack),
        };
    }

    if let Some(image) = rendition.image {
        return ExtractionPath::Raster(image);
    }

    ExtractionPath::Skip(SkipReason::NoDecodableImage)
}

/// Classify a rendition resolved from the theme-store surface
///
/// Precedence on this path: a vector document with a usable encoded
/// stream wins; then the unsliced raster; then a non-empty opaque
/// payload; anything else is a non-visual skip.
pub fn classify_store_rendition(rendition: Rendition) -> ExtractionPath {
    if let Some(ref vector) = rendition.vector {
        // An empty stream means no renderer was available for this
        // entry; fall through to the other payloads
        if !vector.data.is_empty() {
            return ExtractionPath::Vector(rendition.vector.unwrap());
        }
    }

    if let Some(image) = rendition.image {
        return ExtractionPath::Raster(image);
    }

    if rendition.has_data_payload() {
        return ExtractionPath::Data(rendition.data.unwrap_or_default());
    }

    ExtractionPath::Skip(SkipReason::NonVisual)
}

/// Flatten an ordered layer stack into its composite raster
///
/// Layers are drawn bottom-to-top onto a canvas sized to the stack's
/// extent. An empty stack has no composite.
///
/// # Arguments
/// * `layers` - Layer stack, bottom first
///
/// # Returns
/// The flattened composite, or None for an empty stack
pub fn flatten_layers(layers: &[Layer]) -> Option<DynamicImage> {
    if layers.is_empty() {
        return None;
    }

    let width = layers
        .iter()
        .map(|layer| layer.offset_x + layer.image.width())
        .max()
        .unwrap_or(0)
        .max(1);
    let height = layers
        .iter()
        .map(|layer| layer.offset_y + layer.image.height())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut canvas = RgbaImage::new(width, height);
    for layer in layers {
        let raster = layer.image.to_rgba8();
        imageops::overlay(&mut canvas, &raster, layer.offset_x as i64, layer.offset_y as i64);
    }

    Some(DynamicImage::ImageRgba8(canvas))
}
