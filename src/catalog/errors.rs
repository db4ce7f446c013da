//! Custom error types for catalog extraction

use std::fmt;
use std::io;

/// Catalog-specific error types
#[derive(Debug)]
pub enum CatalogError {
    /// I/O error
    IoError(io::Error),
    /// No usable container path could be derived from the input
    ContainerPathUnresolved,
    /// The rendition source could not open or decode the container
    ContainerOpenFailed(String),
    /// The container matched the restricted-format marker
    UnsupportedRestrictedFormat,
    /// A full traversal produced no descriptors
    NoAssetsProduced,
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IoError(e) => write!(f, "I/O error: {}", e),
            CatalogError::ContainerPathUnresolved => write!(f, "No usable container path"),
            CatalogError::ContainerOpenFailed(msg) => write!(f, "Failed to open container: {}", msg),
            CatalogError::UnsupportedRestrictedFormat => write!(f, "Restricted catalog format is not supported"),
            CatalogError::NoAssetsProduced => write!(f, "Container yielded no extractable assets"),
            CatalogError::GenericError(msg) => write!(f, "Catalog error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<io::Error> for CatalogError {
    fn from(error: io::Error) -> Self {
        CatalogError::IoError(error)
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::GenericError(msg)
    }
}
