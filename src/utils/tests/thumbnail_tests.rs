//! Tests for thumbnail synthesis

extern crate std;

use image::{DynamicImage, RgbaImage};

use crate::utils::thumbnail_utils::{constrain, document_placeholder};

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255])))
}

#[test]
fn test_constrain_keeps_fitting_image() {
    let image = solid(100, 80);
    let constrained = constrain(&image, 200, 200);
    std::assert_eq!((constrained.width(), constrained.height()), (100, 80));
}

#[test]
fn test_constrain_exact_fit_unchanged() {
    let image = solid(200, 200);
    let constrained = constrain(&image, 200, 200);
    std::assert_eq!((constrained.width(), constrained.height()), (200, 200));
}

#[test]
fn test_constrain_limits_wide_image() {
    let image = solid(400, 100);
    let constrained = constrain(&image, 200, 200);
    std::assert_eq!((constrained.width(), constrained.height()), (200, 50));
}

#[test]
fn test_constrain_limits_tall_image() {
    let image = solid(100, 400);
    let constrained = constrain(&image, 200, 200);
    std::assert_eq!((constrained.width(), constrained.height()), (50, 200));
}

#[test]
fn test_constrain_preserves_aspect_within_rounding() {
    let image = solid(333, 217);
    let constrained = constrain(&image, 128, 128);

    std::assert!(constrained.width() <= 128);
    std::assert!(constrained.height() <= 128);

    let source_ratio = 333.0 / 217.0;
    let result_ratio = constrained.width() as f64 / constrained.height() as f64;
    std::assert!((source_ratio - result_ratio).abs() < 0.05);
}

#[test]
fn test_constrain_floors_collapsed_axis() {
    let image = solid(1000, 2);
    let constrained = constrain(&image, 100, 100);
    std::assert_eq!(constrained.width(), 100);
    std::assert!(constrained.height() >= 1);
}

#[test]
fn test_placeholder_matches_bounding_size() {
    let card = document_placeholder("pdf", 256, 192);
    std::assert_eq!((card.width(), card.height()), (256, 192));
}

#[test]
fn test_placeholder_is_deterministic() {
    let first = document_placeholder("json", 128, 128);
    let second = document_placeholder("json", 128, 128);
    std::assert_eq!(first.to_rgba8().into_raw(), second.to_rgba8().into_raw());
}

#[test]
fn test_placeholder_differs_by_extension() {
    let json = document_placeholder("json", 128, 128);
    let xml = document_placeholder("xml", 128, 128);
    std::assert!(json.to_rgba8().into_raw() != xml.to_rgba8().into_raw());
}

#[test]
fn test_placeholder_survives_tiny_canvas() {
    // Label drawing is skipped when it cannot fit; the card must
    // still come out at the requested size
    let card = document_placeholder("bin", 4, 4);
    std::assert_eq!((card.width(), card.height()), (4, 4));
}
