//! Embedded Arrow schema decoding and type projection.
//!
//! Dataset descriptors carry their schema as a base64-encoded Arrow IPC
//! `Schema` flatbuffer. This crate turns that payload into a
//! [`SchemaTree`](p2s_model::SchemaTree) and projects it into the closed
//! `"class"` vocabulary of [`ProjectedType`](p2s_model::ProjectedType).
//!
//! # Example
//!
//! ```
//! use p2s_arrow::{decode_schema_base64, project_schema};
//!
//! fn field_count(batch_schema: &str) -> p2s_arrow::Result<usize> {
//!     let tree = decode_schema_base64(batch_schema)?;
//!     let projected = project_schema(&tree)?;
//!     Ok(projected.fields.len())
//! }
//!
//! assert!(field_count("not a schema").is_err());
//! ```

mod convert;
mod decode;
mod error;
mod project;

pub use convert::convert_dataset;
pub use decode::{decode_schema, decode_schema_base64};
pub use error::{Result, SchemaError};
pub use project::{project_field, project_schema, project_type};
