//! Error types for geolist.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for geolist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Digest record is not a valid JSON object of strings
    #[error("invalid digest record: {0}")]
    DigestRecord(#[from] serde_json::Error),

    /// Source document has no usable payload
    #[error("invalid rule document: {0}")]
    InvalidDocument(String),

    /// Output path exists but is not a directory
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error only concerns the contents of a single document.
    ///
    /// Such errors are logged and the document skipped; everything else
    /// aborts the run.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Yaml(_) | Error::InvalidDocument(_))
    }
}

/// Result type alias for geolist operations.
pub type Result<T> = std::result::Result<T, Error>;
