//! Thumbnail synthesis
//!
//! Two kinds of previews come out of a run: a bounded-size resize of a
//! raster asset, and a synthetic card-shaped placeholder for document
//! assets that have no native preview. Both are deterministic given
//! the same inputs.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

/// Background fill of the placeholder card
const CARD_BACKGROUND: Rgba<u8> = Rgba([0xF4, 0xF4, 0xF6, 0xFF]);
/// Border ring of the placeholder card
const CARD_BORDER: Rgba<u8> = Rgba([0x9A, 0x9A, 0xA2, 0xFF]);
/// Centered label plate of the placeholder card
const CARD_PLATE: Rgba<u8> = Rgba([0xDD, 0xDD, 0xE4, 0xFF]);
/// Label glyph color
const CARD_LABEL: Rgba<u8> = Rgba([0x3C, 0x3C, 0x46, 0xFF]);

/// Longest extension label drawn on a placeholder
const MAX_LABEL_CHARS: usize = 4;

/// Fit an image into a bounding box, preserving aspect ratio
///
/// An image that already fits on both axes is returned as an unscaled
/// copy. Otherwise the larger of the two source-to-bound ratios is the
/// limiting one and both extents shrink by it, each rounded and floored
/// to a minimum of one pixel.
///
/// # Arguments
/// * `image` - Source raster
/// * `max_width` - Bounding box width
/// * `max_height` - Bounding box height
///
/// # Returns
/// A new raster no larger than the bounding box on either axis
pub fn constrain(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= max_width && height <= max_height {
        return image.clone();
    }

    let width_ratio = width as f64 / max_width as f64;
    let height_ratio = height as f64 / max_height as f64;
    let limiting_ratio = width_ratio.max(height_ratio);

    let new_width = ((width as f64 / limiting_ratio).round() as u32).max(1);
    let new_height = ((height as f64 / limiting_ratio).round() as u32).max(1);

    image.resize_exact(new_width, new_height, FilterType::Triangle)
}

/// Synthesize a placeholder preview for a document asset
///
/// Draws a flat card: background fill, one-pixel border, a centered
/// label plate, and the uppercase extension label rendered with the
/// built-in glyph face. Deterministic for a given extension and
/// bounding size.
///
/// # Arguments
/// * `extension` - Document extension, any case, without the dot
/// * `width` - Card width
/// * `height` - Card height
///
/// # Returns
/// The placeholder raster, exactly `width` by `height` (floored to 1)
pub fn document_placeholder(extension: &str, width: u32, height: u32) -> DynamicImage {
    let width = width.max(1);
    let height = height.max(1);

    let mut canvas = RgbaImage::from_pixel(width, height, CARD_BACKGROUND);

    draw_border(&mut canvas);
    draw_plate(&mut canvas);

    let label: String = extension
        .to_uppercase()
        .chars()
        .take(MAX_LABEL_CHARS)
        .collect();
    draw_label(&mut canvas, &label);

    DynamicImage::ImageRgba8(canvas)
}

/// Draw the one-pixel border ring
fn draw_border(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    for x in 0..width {
        canvas.put_pixel(x, 0, CARD_BORDER);
        canvas.put_pixel(x, height - 1, CARD_BORDER);
    }
    for y in 0..height {
        canvas.put_pixel(0, y, CARD_BORDER);
        canvas.put_pixel(width - 1, y, CARD_BORDER);
    }
}

/// Draw the centered label plate
fn draw_plate(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let plate_width = (width * 2 / 3).max(1);
    let plate_height = (height / 3).max(1);
    let left = (width - plate_width) / 2;
    let top = (height - plate_height) / 2;

    for y in top..(top + plate_height).min(height) {
        for x in left..(left + plate_width).min(width) {
            canvas.put_pixel(x, y, CARD_PLATE);
        }
    }
}

/// Draw the label centered on the canvas
///
/// Glyphs are 5x7 bitmaps scaled by an integral factor derived from
/// the card height; characters outside the built-in face are skipped.
fn draw_label(canvas: &mut RgbaImage, label: &str) {
    let glyphs: Vec<[u8; 7]> = label.chars().filter_map(glyph_rows).collect();
    if glyphs.is_empty() {
        return;
    }

    let (width, height) = canvas.dimensions();
    let scale = (height / 24).max(1);
    let advance = 6 * scale;
    let label_width = advance * glyphs.len() as u32 - scale;
    let label_height = 7 * scale;

    if label_width > width || label_height > height {
        return;
    }

    let left = (width - label_width) / 2;
    let top = (height - label_height) / 2;

    for (index, rows) in glyphs.iter().enumerate() {
        let origin_x = left + index as u32 * advance;
        draw_glyph(canvas, rows, origin_x, top, scale);
    }
}

/// Draw one scaled 5x7 glyph at the given origin
fn draw_glyph(canvas: &mut RgbaImage, rows: &[u8; 7], origin_x: u32, origin_y: u32, scale: u32) {
    let (width, height) = canvas.dimensions();
    for (row, bits) in rows.iter().enumerate() {
        for column in 0..5u32 {
            if bits & (0b10000 >> column) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = origin_x + column * scale + dx;
                    let y = origin_y + row as u32 * scale + dy;
                    if x < width && y < height {
                        canvas.put_pixel(x, y, CARD_LABEL);
                    }
                }
            }
        }
    }
}

/// 5x7 bitmap rows for the built-in glyph face (A-Z and 0-9)
fn glyph_rows(character: char) -> Option<[u8; 7]> {
    let rows = match character {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(rows)
}
