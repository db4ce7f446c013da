//! Tests for rendition classification and layer flattening

extern crate std;

use std::vec::Vec;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::catalog::rendition::{Layer, Rendition, Scale, VectorDocument};
use crate::extractor::classifier::{
    classify_catalog_variant, classify_store_rendition, flatten_layers,
    ExtractionPath, SkipReason,
};

fn solid(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255])))
}

#[test]
fn test_flat_path_routes_data_before_image() {
    let mut rendition = Rendition::with_image("blob", Scale::Single, solid(2, 2, 10));
    rendition.data = Some(Vec::from(&b"payload"[..]));

    match classify_catalog_variant(rendition) {
        ExtractionPath::Data(data) => std::assert_eq!(data, b"payload"),
        _ => std::panic!("expected the data path"),
    }
}

#[test]
fn test_flat_path_plain_raster() {
    let rendition = Rendition::with_image("icon", Scale::Double, solid(4, 4, 20));

    std::assert!(matches!(classify_catalog_variant(rendition), ExtractionPath::Raster(_)));
}

#[test]
fn test_flat_path_empty_layer_stack_skips() {
    let mut rendition = Rendition::new("layered", Scale::Single);
    rendition.layers = Some(Vec::new());

    std::assert!(matches!(
        classify_catalog_variant(rendition),
        ExtractionPath::Skip(SkipReason::EmptyLayerStack)
    ));
}

#[test]
fn test_flat_path_layer_stack_flattens() {
    let mut rendition = Rendition::new("layered", Scale::Single);
    rendition.layers = Some(Vec::from([
        Layer::at_origin(solid(4, 4, 50)),
        Layer::new(solid(2, 2, 200), 2, 2),
    ]));

    match classify_catalog_variant(rendition) {
        ExtractionPath::Raster(composite) => {
            std::assert_eq!((composite.width(), composite.height()), (4, 4));
        }
        _ => std::panic!("expected a flattened raster"),
    }
}

#[test]
fn test_flat_path_empty_rendition_skips() {
    let rendition = Rendition::new("ghost", Scale::Single);

    std::assert!(matches!(
        classify_catalog_variant(rendition),
        ExtractionPath::Skip(SkipReason::NoDecodableImage)
    ));
}

#[test]
fn test_store_path_vector_wins() {
    let mut rendition = Rendition::with_image("glyph", Scale::Single, solid(2, 2, 10));
    rendition.vector = Some(VectorDocument::new(Vec::from(&b"%PDF-1.4"[..])));

    std::assert!(matches!(classify_store_rendition(rendition), ExtractionPath::Vector(_)));
}

#[test]
fn test_store_path_empty_vector_falls_through() {
    // An empty stream means no renderer was available; the raster
    // payload is used instead
    let mut rendition = Rendition::with_image("glyph", Scale::Single, solid(2, 2, 10));
    rendition.vector = Some(VectorDocument::new(Vec::new()));

    std::assert!(matches!(classify_store_rendition(rendition), ExtractionPath::Raster(_)));
}

#[test]
fn test_store_path_data_after_image() {
    let rendition = Rendition::with_data("settings", Vec::from(&b"{}"[..]));

    std::assert!(matches!(classify_store_rendition(rendition), ExtractionPath::Data(_)));
}

#[test]
fn test_store_path_empty_rendition_is_non_visual() {
    let rendition = Rendition::new("effect", Scale::Single);

    std::assert!(matches!(
        classify_store_rendition(rendition),
        ExtractionPath::Skip(SkipReason::NonVisual)
    ));
}

#[test]
fn test_flatten_composites_bottom_to_top() {
    let layers = [
        Layer::at_origin(solid(4, 4, 50)),
        Layer::new(solid(2, 2, 200), 1, 1),
    ];

    let composite = flatten_layers(&layers).unwrap();
    std::assert_eq!((composite.width(), composite.height()), (4, 4));

    // The top layer overwrites the bottom one where they overlap
    std::assert_eq!(composite.get_pixel(1, 1), Rgba([200, 200, 200, 255]));
    std::assert_eq!(composite.get_pixel(0, 0), Rgba([50, 50, 50, 255]));
}

#[test]
fn test_flatten_canvas_covers_offsets() {
    let layers = [Layer::new(solid(3, 2, 10), 5, 7)];

    let composite = flatten_layers(&layers).unwrap();
    std::assert_eq!((composite.width(), composite.height()), (8, 9));
}

#[test]
fn test_flatten_empty_stack() {
    std::assert!(flatten_layers(&[]).is_none());
}
