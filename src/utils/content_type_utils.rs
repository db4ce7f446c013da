//! Content-type sniffing for opaque payloads
//!
//! Asset containers hand back raw byte payloads whose logical names
//! often carry no usable extension. The sniffer classifies such a
//! payload into a file kind through a priority chain: the first
//! matching rule wins and later rules are not evaluated.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ATX heading at the start of a line, e.g. "# Title"
    static ref MARKDOWN_HEADING: Regex = Regex::new(r"(?m)^#{1,6} ").unwrap();
    // Inline link, e.g. "[label](https://...)"
    static ref MARKDOWN_INLINE_LINK: Regex = Regex::new(r"\[[^\]]*\]\([^)]+\)").unwrap();
    // Opening HTML or DOCTYPE tag, anywhere in the payload
    static ref HTML_OPENING_TAG: Regex = Regex::new(r"(?i)<(?:!DOCTYPE\s+html|html|head|body)[\s>]").unwrap();
}

/// Fenced code block marker
const MARKDOWN_FENCE: &str = "```";

/// PNG file signature prefix
const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// JPEG start-of-image marker
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// PDF header
const PDF_HEADER: [u8; 4] = *b"%PDF";

/// Detect a file extension for an opaque payload
///
/// The rules form a priority chain:
/// 1. a non-empty extension on the name's own path component wins,
/// 2. payloads that decode as UTF-8 are matched against text formats
///    (markdown, html, json, xml) and fall back to `txt`,
/// 3. binary payloads are matched against known magic numbers,
/// 4. anything else (including an empty payload) is `bin`.
///
/// # Arguments
/// * `data` - Raw payload bytes
/// * `name` - Logical asset name the payload came with
///
/// # Returns
/// The detected extension, without the leading dot
pub fn extension_for(data: &[u8], name: &str) -> String {
    // Rule 1: trust an extension the name already carries
    if let Some(extension) = name_extension(name) {
        return extension;
    }

    // Rule 2: textual payloads
    if !data.is_empty() {
        if let Ok(text) = std::str::from_utf8(data) {
            return text_extension(text).to_string();
        }
    }

    // Rule 3: binary magic numbers
    if data.starts_with(&PNG_SIGNATURE) {
        return "png".to_string();
    }
    if data.starts_with(&JPEG_SOI) {
        return "jpg".to_string();
    }
    if data.starts_with(&PDF_HEADER) {
        return "pdf".to_string();
    }

    // Rule 4: fallback
    "bin".to_string()
}

/// Extension carried by the name's own path component, if any
fn name_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_string())
}

/// Classify a UTF-8 payload into a text format
fn text_extension(text: &str) -> &'static str {
    if MARKDOWN_HEADING.is_match(text)
        || text.contains(MARKDOWN_FENCE)
        || MARKDOWN_INLINE_LINK.is_match(text)
    {
        return "md";
    }
    if HTML_OPENING_TAG.is_match(text) {
        return "html";
    }
    if text.starts_with('{') || text.starts_with('[') {
        return "json";
    }
    if text.starts_with("<?xml") {
        return "xml";
    }
    "txt"
}
