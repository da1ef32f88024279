//! Schema sinks.
//!
//! The destination is chosen once at startup: with no output directory the
//! schemas go to standard output as `"<name>":<json>` lines, otherwise each
//! dataset is written to `<dir>/<sanitized name>.json`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use p2s_model::ProjectedSchema;

use crate::error::{OutputError, Result};

/// Destination for projected schemas.
pub trait SchemaSink {
    /// Emit one dataset's schema under `name`.
    fn emit(&mut self, name: &str, schema: &ProjectedSchema) -> Result<()>;
}

/// Open the sink for an optional output directory.
///
/// # Errors
///
/// Returns [`OutputError::CreateDir`] if the directory is missing and cannot
/// be created.
pub fn open_sink(output_dir: Option<&Path>) -> Result<Box<dyn SchemaSink>> {
    match output_dir {
        Some(dir) => Ok(Box::new(DirectorySink::create(dir)?)),
        None => Ok(Box::new(StdoutSink::stdout())),
    }
}

/// Writes `"<name>":<pretty json>` lines to a stream.
pub struct StdoutSink<W: Write> {
    writer: W,
}

impl StdoutSink<io::Stdout> {
    /// Sink bound to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SchemaSink for StdoutSink<W> {
    fn emit(&mut self, name: &str, schema: &ProjectedSchema) -> Result<()> {
        let serialize_error = |source| OutputError::Serialize {
            dataset: name.to_string(),
            source,
        };
        let key = serde_json::to_string(name).map_err(serialize_error)?;
        let body = serde_json::to_string_pretty(schema).map_err(serialize_error)?;

        writeln!(self.writer, "{key}:{body}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| OutputError::Write {
                dataset: name.to_string(),
                target: "standard output".to_string(),
                source,
            })
    }
}

/// Writes one `<sanitized name>.json` file per dataset into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Ensure `dir` exists (creating parents as needed) and return a sink for it.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            debug!(path = %dir.display(), "created output directory");
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that the schema for `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_dataset_name(name)))
    }
}

impl SchemaSink for DirectorySink {
    fn emit(&mut self, name: &str, schema: &ProjectedSchema) -> Result<()> {
        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(schema).map_err(|source| {
            OutputError::Serialize {
                dataset: name.to_string(),
                source,
            }
        })?;
        fs::write(&path, format!("{json}\n")).map_err(|source| OutputError::Write {
            dataset: name.to_string(),
            target: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "wrote schema file");
        Ok(())
    }
}

/// Replace every character outside `[a-zA-Z0-9.-]` with `_`.
pub fn sanitize_dataset_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
