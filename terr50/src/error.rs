//! Error types for the terr50 library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when resolving elevations against a terrain index.
#[derive(Error, Debug)]
pub enum Terr50Error {
    /// IO error when opening or mapping the index file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The index file does not exist.
    #[error("terrain index not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file does not start with the terrain index signature.
    #[error("not a terrain index: bad signature")]
    InvalidSignature,

    /// A fixed-width read ran past the end of the index file.
    #[error("terrain index truncated: {expected} bytes at offset {offset}")]
    Truncated { offset: u64, expected: usize },

    /// A lookup was requested with no locations.
    #[error("no locations supplied")]
    EmptyLocations,
}

/// Result type alias using [`Terr50Error`].
pub type Result<T> = std::result::Result<T, Terr50Error>;
