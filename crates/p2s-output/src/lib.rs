//! Output sinks for projected schemas.

mod error;
mod sink;

pub use error::{OutputError, Result};
pub use sink::{DirectorySink, SchemaSink, StdoutSink, open_sink, sanitize_dataset_name};
