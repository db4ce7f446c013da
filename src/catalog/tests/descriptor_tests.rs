//! Tests for the descriptor output model

extern crate std;

use std::string::ToString;
use std::vec::Vec;

use image::{DynamicImage, RgbaImage};

use crate::catalog::descriptor::{AssetDescriptor, AssetKind};

fn pixel() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])))
}

#[test]
fn test_image_descriptor_kind_and_bytes() {
    let encoded: Vec<u8> = Vec::from(&[1u8, 2, 3][..]);
    let descriptor = AssetDescriptor::image(
        "icon", "icon.png".to_string(), pixel(), Some(encoded), None);

    std::assert_eq!(descriptor.kind(), AssetKind::Image);
    std::assert_eq!(descriptor.output_bytes(), Some(&[1u8, 2, 3][..]));
}

#[test]
fn test_constrained_image_has_no_bytes() {
    let descriptor = AssetDescriptor::image(
        "icon", "icon.png".to_string(), pixel(), None, None);

    std::assert_eq!(descriptor.kind(), AssetKind::Image);
    std::assert!(descriptor.output_bytes().is_none());
    std::assert!(descriptor.thumbnail.is_none());
}

#[test]
fn test_document_descriptor_kind_and_bytes() {
    let descriptor = AssetDescriptor::document(
        "notes", "notes.md".to_string(), Vec::from(&b"# hi"[..]), "md".to_string(), None);

    std::assert_eq!(descriptor.kind(), AssetKind::Document);
    std::assert_eq!(descriptor.output_bytes(), Some(&b"# hi"[..]));
}
