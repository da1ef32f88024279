//! Profile extraction from plain files and zip archives.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::{debug, info};
use zip::ZipArchive;

use p2s_model::ProfileDocument;

use crate::error::{IngestError, Result};

/// Substring that marks the profile entry inside an archive.
pub const PROFILE_ENTRY_MARKER: &str = "profile";

/// Local file header signature at the start of a zip archive.
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Load the profile document from `path`.
///
/// Archives are recognized by a `.zip` extension or by their leading
/// signature; anything else is parsed as a JSON profile document.
pub fn extract_profile(path: &Path) -> Result<ProfileDocument> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document = if is_archive(path, &bytes) {
        debug!(path = %path.display(), "reading profile from archive");
        read_profile_from_archive(Cursor::new(bytes.as_slice()), path)?
    } else {
        parse_profile(&bytes, &path.display().to_string())?
    };

    info!(
        datasets = document.datasets().len(),
        with_schema = document.schema_count(),
        "loaded profile"
    );
    Ok(document)
}

/// Returns true if the input should be treated as a zip archive.
pub fn is_archive(path: &Path, bytes: &[u8]) -> bool {
    let zip_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    zip_extension || bytes.starts_with(ZIP_MAGIC)
}

/// Parse the first non-directory entry whose name contains `profile`.
///
/// Entries are scanned in the order the archive's central directory lists
/// them. `path` is only used for error reporting.
pub fn read_profile_from_archive<R: Read + Seek>(
    reader: R,
    path: &Path,
) -> Result<ProfileDocument> {
    let archive_error = |source| IngestError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(reader).map_err(archive_error)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(archive_error)?;
        if entry.is_dir() || !entry.name().contains(PROFILE_ENTRY_MARKER) {
            continue;
        }
        let origin = format!("{}!{}", path.display(), entry.name());
        info!(entry = %entry.name(), "using archive entry as profile");

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|source| IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        return parse_profile(&content, &origin);
    }

    Err(IngestError::ProfileNotFound {
        path: path.to_path_buf(),
    })
}

/// Parse profile JSON. `origin` names the source in error messages.
pub fn parse_profile(bytes: &[u8], origin: &str) -> Result<ProfileDocument> {
    serde_json::from_slice(bytes).map_err(|source| IngestError::Parse {
        origin: origin.to_string(),
        source,
    })
}
