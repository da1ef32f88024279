//! Error types for schema output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while emitting a projected schema.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("unable to create directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema file or the output stream could not be written.
    #[error("unable to write schema for {dataset} to {target}: {source}")]
    Write {
        dataset: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema could not be serialized.
    #[error("unable to serialize schema for {dataset}: {source}")]
    Serialize {
        dataset: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
