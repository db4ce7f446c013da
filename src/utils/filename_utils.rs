//! Filename cleaning and per-run uniquification
//!
//! Logical asset names can contain path separators and repeat across a
//! container; output filenames must be flat and unique for the whole
//! run. The uniquifier's counters are keyed by the originally requested
//! filename, so disambiguation suffixes are counter-derived and two
//! runs over the same enumeration order reproduce identical filenames.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Characters that cannot appear in a flat output filename
    static ref ILLEGAL_CHARACTERS: Regex = Regex::new(r"[/\\:]").unwrap();
}

/// Sanitize a logical asset name into a flat filename stem
pub fn clean_asset_name(name: &str) -> String {
    ILLEGAL_CHARACTERS.replace_all(name.trim(), "_").to_string()
}

/// Desired output filename for a document payload
///
/// Appends the detected extension to the cleaned name, unless the
/// name already ends with it.
pub fn document_filename(name: &str, extension: &str) -> String {
    let cleaned = clean_asset_name(name);
    let suffix = format!(".{}", extension.to_lowercase());
    if cleaned.to_lowercase().ends_with(&suffix) {
        cleaned
    } else {
        format!("{}.{}", cleaned, extension)
    }
}

/// Split a filename into stem and extension at the last dot
///
/// A filename without a dot, or with nothing after the last dot,
/// has no extension.
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            (stem, Some(extension))
        }
        _ => (filename, None),
    }
}

/// Maps requested filenames to guaranteed-unique ones within a run
///
/// The counter map grows monotonically for the duration of one run and
/// is never shared across runs.
#[derive(Default)]
pub struct FilenameUniquifier {
    /// Next disambiguation index per requested filename
    counters: HashMap<String, u32>,
}

impl FilenameUniquifier {
    /// Create an empty uniquifier
    pub fn new() -> Self {
        FilenameUniquifier::default()
    }

    /// Resolve a requested filename to a unique one
    ///
    /// The first request for a filename returns it unchanged. A
    /// colliding request takes the stored count `n`, bumps it, and
    /// inserts `_<n>` before the extension (or appends it when there
    /// is none); the candidate then re-enters resolution until it no
    /// longer collides.
    ///
    /// # Arguments
    /// * `requested` - Desired output filename
    ///
    /// # Returns
    /// A filename unique among every name this uniquifier has handed out
    pub fn uniquify(&mut self, requested: &str) -> String {
        let mut candidate = requested.to_string();

        loop {
            match self.counters.get(&candidate).copied() {
                None => {
                    self.counters.insert(candidate.clone(), 1);
                    return candidate;
                }
                Some(index) => {
                    self.counters.insert(candidate.clone(), index + 1);

                    let (stem, extension) = split_extension(&candidate);
                    let next = match extension {
                        Some(ext) => format!("{}_{}.{}", stem, index, ext),
                        None => format!("{}_{}", candidate, index),
                    };
                    candidate = next;
                }
            }
        }
    }
}
