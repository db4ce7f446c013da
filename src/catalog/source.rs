//! Rendition source boundary
//!
//! The compiled container decoder is an external collaborator hidden
//! behind the RenditionSource trait. The extraction pipeline only ever
//! talks to this boundary: it enumerates logical names (flat catalogs)
//! or composite keys (theme stores) and resolves them to renditions.
//! The pipeline never inspects container bytes beyond the
//! restricted-format marker scan performed at open time.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::catalog::mode::reject_restricted;
use crate::catalog::rendition::{Rendition, RenditionKey, Scale};

/// Source of renditions for one opened container
///
/// Implementations wrap a concrete container backend. A flat-catalog
/// backend answers the name-based surface; a theme-store backend
/// answers the key-based surface. A backend only has to implement the
/// surface it supports, the defaults cover the other one.
pub trait RenditionSource {
    /// Logical names addressable directly, in source order
    ///
    /// Theme-store backends return an empty list, which is one of the
    /// signals the mode selector uses.
    fn image_names(&self) -> Vec<String>;

    /// Whether a name+scale image lookup is answerable at all
    fn supports_name_lookup(&self) -> bool;

    /// Resolve one scale variant of a logical name
    ///
    /// # Arguments
    /// * `name` - Logical asset name
    /// * `scale` - Requested scale
    ///
    /// # Returns
    /// The variant when the container has one at this scale, Ok(None)
    /// when it does not, or an error when the decoder failed on it
    fn variant(&self, name: &str, scale: Scale) -> CatalogResult<Option<Rendition>>;

    /// Composite keys addressing every rendition, in source order
    fn rendition_keys(&self) -> Vec<RenditionKey> {
        Vec::new()
    }

    /// Resolve one keyed rendition
    fn rendition(&self, key: &RenditionKey) -> CatalogResult<Rendition> {
        Err(CatalogError::GenericError(format!(
            "Keyed rendition lookup is not supported by this source: {}", key)))
    }
}

/// Open a container path and wrap it in a rendition source
///
/// A directory opens through the bundle backend. A file is scanned for
/// the restricted-format marker and then handed to a compiled-container
/// decoder; since decoding the compiled byte format lives outside this
/// crate, plain files are rejected with `ContainerOpenFailed` once the
/// marker scan has run.
///
/// # Arguments
/// * `path` - Container path supplied by the caller
///
/// # Returns
/// An opened rendition source, or an error describing why the
/// container could not be opened
pub fn open_container(path: &str) -> CatalogResult<Box<dyn RenditionSource>> {
    if path.trim().is_empty() {
        return Err(CatalogError::ContainerPathUnresolved);
    }

    let container = Path::new(path);
    if !container.exists() {
        warn!("Container path does not exist: {}", path);
        return Err(CatalogError::ContainerPathUnresolved);
    }

    if container.is_dir() {
        info!("Opening {} as a bundle directory", path);
        let source = crate::catalog::bundle::BundleSource::open(path)?;
        return Ok(Box::new(source));
    }

    // Plain file: run the marker scan before anything else touches it
    let bytes = fs::read(container)
        .map_err(|e| CatalogError::ContainerOpenFailed(e.to_string()))?;
    reject_restricted(&bytes)?;

    Err(CatalogError::ContainerOpenFailed(
        "compiled containers require an external rendition source backend".to_string()))
}

/// In-memory rendition source
///
/// Backend used by tests and documentation examples. It can present
/// itself as a flat catalog (named renditions) or as a theme store
/// (keyed renditions only), and can simulate per-key decoder failures.
#[derive(Default)]
pub struct MemorySource {
    /// Logical names in insertion order
    names: Vec<String>,
    /// Name+scale variants for the flat surface
    variants: HashMap<(String, Scale), Rendition>,
    /// Composite keys in insertion order
    keys: Vec<RenditionKey>,
    /// Keyed renditions for the store surface
    store: HashMap<RenditionKey, Rendition>,
    /// Keys whose resolution should fail, simulating decoder errors
    failing_keys: HashSet<RenditionKey>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        MemorySource::default()
    }

    /// Register a named rendition on the flat surface
    ///
    /// The logical name is enumerated in first-insertion order; the
    /// variant is addressable by name and scale.
    pub fn push_named(&mut self, rendition: Rendition) {
        let name = rendition.name.clone();
        if !self.names.contains(&name) {
            self.names.push(name.clone());
        }
        self.variants.insert((name, rendition.scale), rendition);
    }

    /// Register a keyed rendition on the theme-store surface
    pub fn push_keyed(&mut self, key: RenditionKey, rendition: Rendition) {
        if !self.keys.contains(&key) {
            self.keys.push(key.clone());
        }
        self.store.insert(key, rendition);
    }

    /// Register a key whose resolution fails with a decoder error
    pub fn push_failing_key(&mut self, key: RenditionKey) {
        if !self.keys.contains(&key) {
            self.keys.push(key.clone());
        }
        self.failing_keys.insert(key);
    }
}

impl RenditionSource for MemorySource {
    fn image_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn supports_name_lookup(&self) -> bool {
        !self.names.is_empty()
    }

    fn variant(&self, name: &str, scale: Scale) -> CatalogResult<Option<Rendition>> {
        debug!("Resolving variant {}{}", name, scale.suffix());
        Ok(self.variants.get(&(name.to_string(), scale)).cloned())
    }

    fn rendition_keys(&self) -> Vec<RenditionKey> {
        self.keys.clone()
    }

    fn rendition(&self, key: &RenditionKey) -> CatalogResult<Rendition> {
        if self.failing_keys.contains(key) {
            return Err(CatalogError::GenericError(format!(
                "Decoder failed on rendition {}", key)));
        }
        self.store
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::GenericError(format!("Unknown rendition key: {}", key)))
    }
}
