//! Tests for catalog mode selection

extern crate std;

use std::vec::Vec;

use image::{DynamicImage, RgbaImage};

use crate::catalog::errors::CatalogError;
use crate::catalog::mode::{
    contains_restricted_marker, detect_mode, reject_restricted, select_mode,
    CatalogMode, RESTRICTED_FORMAT_MARKER,
};
use crate::catalog::rendition::{PresentationState, Rendition, RenditionKey, Scale};
use crate::catalog::source::MemorySource;

fn pixel() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])))
}

#[test]
fn test_marker_found_mid_buffer() {
    let mut bytes: Vec<u8> = Vec::from(&b"header"[..]);
    bytes.extend_from_slice(&RESTRICTED_FORMAT_MARKER);
    bytes.extend_from_slice(b"trailer");

    std::assert!(contains_restricted_marker(&bytes));
}

#[test]
fn test_marker_absent() {
    std::assert!(!contains_restricted_marker(b"just an ordinary container"));
    std::assert!(!contains_restricted_marker(b""));
}

#[test]
fn test_reject_restricted_error_variant() {
    let result = reject_restricted(&RESTRICTED_FORMAT_MARKER);
    std::assert!(matches!(result, Err(CatalogError::UnsupportedRestrictedFormat)));

    std::assert!(reject_restricted(b"clean").is_ok());
}

#[test]
fn test_named_source_is_flat_catalog() {
    let mut source = MemorySource::new();
    source.push_named(Rendition::with_image("icon", Scale::Single, pixel()));

    std::assert_eq!(detect_mode(&source), CatalogMode::FlatCatalog);
}

#[test]
fn test_keyed_source_is_theme_store() {
    let mut source = MemorySource::new();
    let key = RenditionKey::new("button", Scale::Single, PresentationState::Normal);
    source.push_keyed(key, Rendition::with_image("button", Scale::Single, pixel()));

    std::assert_eq!(detect_mode(&source), CatalogMode::ThemeStore);
}

#[test]
fn test_empty_source_is_theme_store() {
    let source = MemorySource::new();
    std::assert_eq!(detect_mode(&source), CatalogMode::ThemeStore);
}

#[test]
fn test_override_bypasses_heuristic() {
    let mut source = MemorySource::new();
    source.push_named(Rendition::with_image("icon", Scale::Single, pixel()));

    std::assert_eq!(select_mode(&source, Some(CatalogMode::ThemeStore)), CatalogMode::ThemeStore);
    std::assert_eq!(select_mode(&source, None), CatalogMode::FlatCatalog);
}
