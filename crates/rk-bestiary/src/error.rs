//! Error types for the bestiary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for bestiary operations.
pub type BestiaryResult<T> = Result<T, BestiaryError>;

/// Errors that can occur reading, writing, or generating statblocks.
#[derive(Debug, Error)]
pub enum BestiaryError {
    /// A file could not be read or written.
    #[error("io error at {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A bulk entry is missing its `index` field.
    #[error("bulk entry {position} has no string \"index\" field")]
    MissingIndex {
        /// Zero-based position in the bulk array.
        position: usize,
    },

    /// The requested entry is not in the catalog.
    #[error("no catalog entry named \"{0}\"")]
    UnknownEntry(String),
}
