//! Error types for profile ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating and parsing a profile document.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Archive Errors ===
    /// The archive is unreadable or one of its entries is corrupt.
    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive holds no entry whose name contains `profile`.
    #[error("archive {path} does not contain a profile and so cannot be parsed")]
    ProfileNotFound { path: PathBuf },

    // === Parsing Errors ===
    /// The profile document is not valid JSON or has the wrong shape.
    #[error("failed to parse profile {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
