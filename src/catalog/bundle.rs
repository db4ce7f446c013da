//! Directory bundle rendition source
//!
//! Debug backend that treats a directory of loose files as a flat
//! catalog: image files become image renditions (with the scale parsed
//! from a trailing `@2x`/`@3x` stem suffix) and every other file
//! becomes a data rendition. It exists so the CLI and examples can
//! exercise the full pipeline without a compiled-container decoder,
//! and it never parses any compiled byte format.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::catalog::rendition::{Rendition, Scale};
use crate::catalog::source::RenditionSource;

lazy_static! {
    // Trailing density suffix on an image file stem, e.g. "icon@2x"
    static ref SCALE_SUFFIX: Regex = Regex::new(r"^(?P<base>.+)@(?P<factor>[23])x$").unwrap();
}

/// File extensions decoded as image renditions
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

/// One file backing a bundle entry
enum BundleEntry {
    /// Image file, decoded on resolution
    Image(PathBuf),
    /// Any other file, read as a raw data payload
    Data(PathBuf),
}

/// Flat-catalog source backed by a directory of loose files
pub struct BundleSource {
    /// Logical names in enumeration order
    names: Vec<String>,
    /// Entries addressable by name and scale
    entries: HashMap<(String, Scale), BundleEntry>,
}

impl BundleSource {
    /// Open a bundle directory
    ///
    /// Files are enumerated in lexical order so repeated runs over the
    /// same bundle traverse identically.
    ///
    /// # Arguments
    /// * `path` - Directory to scan
    ///
    /// # Returns
    /// An opened source, or an error when the directory is unreadable
    pub fn open(path: &str) -> CatalogResult<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|e| CatalogError::ContainerOpenFailed(e.to_string()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut source = BundleSource {
            names: Vec::new(),
            entries: HashMap::new(),
        };

        for file in &paths {
            source.register(file);
        }

        info!("Opened bundle {} with {} logical names", path, source.names.len());
        Ok(source)
    }

    /// Register one file as a bundle entry
    fn register(&mut self, file: &Path) {
        let Some(file_name) = file.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping bundle file with undecodable name: {}", file.display());
            return;
        };

        let extension = file
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("")
            .to_lowercase();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
            let (name, scale) = split_scale_suffix(stem);
            debug!("Bundle image entry: {} at {}x", name, scale.factor());
            self.push(name, scale, BundleEntry::Image(file.to_path_buf()));
        } else {
            // Keep the full file name as the logical name so the
            // sniffer can reuse its extension downstream
            debug!("Bundle data entry: {}", file_name);
            self.push(file_name.to_string(), Scale::Single, BundleEntry::Data(file.to_path_buf()));
        }
    }

    fn push(&mut self, name: String, scale: Scale, entry: BundleEntry) {
        if !self.names.contains(&name) {
            self.names.push(name.clone());
        }
        self.entries.insert((name, scale), entry);
    }
}

/// Split a trailing density suffix off an image file stem
fn split_scale_suffix(stem: &str) -> (String, Scale) {
    if let Some(captures) = SCALE_SUFFIX.captures(stem) {
        let scale = match &captures["factor"] {
            "2" => Scale::Double,
            _ => Scale::Triple,
        };
        (captures["base"].to_string(), scale)
    } else {
        (stem.to_string(), Scale::Single)
    }
}

impl RenditionSource for BundleSource {
    fn image_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn supports_name_lookup(&self) -> bool {
        true
    }

    fn variant(&self, name: &str, scale: Scale) -> CatalogResult<Option<Rendition>> {
        match self.entries.get(&(name.to_string(), scale)) {
            Some(BundleEntry::Image(path)) => {
                let image = image::open(path)
                    .map_err(|e| CatalogError::GenericError(
                        format!("Failed to decode {}: {}", path.display(), e)))?;
                Ok(Some(Rendition::with_image(name, scale, image)))
            }
            Some(BundleEntry::Data(path)) => {
                let data = fs::read(path)?;
                Ok(Some(Rendition::with_data(name, data)))
            }
            None => Ok(None),
        }
    }
}
