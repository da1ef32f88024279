//! Profile document ingestion.
//!
//! The input is either a profile JSON document or a zip archive holding one
//! (the first entry whose name contains `profile`).

mod error;
mod extract;

pub use error::{IngestError, Result};
pub use extract::{
    PROFILE_ENTRY_MARKER, extract_profile, is_archive, parse_profile, read_profile_from_archive,
};
