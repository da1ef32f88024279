//! Data model for profile-to-schema conversion.
//!
//! - [`profile`]: the profile document and its dataset descriptors
//! - [`schema`]: the decoded schema tree
//! - [`projection`]: the JSON-ready projected schema

pub mod profile;
pub mod projection;
pub mod schema;

pub use profile::{DatasetProfile, ProfileDocument};
pub use projection::{
    CLASS_VOCABULARY, FieldDefinition, OutputSchema, ProjectedSchema, ProjectedType,
};
pub use schema::{
    DateUnit, FieldNode, FieldType, IntervalUnit, Metadata, Precision, SchemaTree, TimeUnit,
    UnionMode,
};
