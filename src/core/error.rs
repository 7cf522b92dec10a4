use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for the catalog manager and its store
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Category outside of Book, Film and Magazine
    #[error("Invalid category: {0}. Must be one of Book, Film, Magazine")]
    InvalidCategory(String),

    /// The store file exists but does not hold a valid catalog document
    #[error("Malformed store file {path:?}: {source}")]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the store file failed
    #[error("Could not write store file {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every numeric identifier up to u64::MAX is taken
    #[error("No numeric identifier left to assign")]
    IdSpaceExhausted,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
