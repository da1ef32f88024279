//! JSON-ready projection of a schema tree.
//!
//! Every [`ProjectedType`] serializes to an object with exactly one `"class"`
//! entry taken from [`CLASS_VOCABULARY`], plus the keys specific to that class.

use serde::Serialize;

use crate::schema::{DateUnit, IntervalUnit, Metadata, TimeUnit, UnionMode};

/// Every class tag a projected type may carry.
pub const CLASS_VOCABULARY: &[&str] = &[
    "NULL",
    "STRUCT",
    "LIST",
    "LARGE_LIST",
    "FIXED_SIZE_LIST",
    "UNION",
    "MAP",
    "INT",
    "FLOAT",
    "DOUBLE",
    "UTF8",
    "LARGE_UTF8",
    "BINARY",
    "LARGE_BINARY",
    "FIXED_SIZE_BINARY",
    "BOOL",
    "DECIMAL",
    "DATE",
    "TIME",
    "TIMESTAMP",
    "INTERVAL",
    "DURATION",
    "NONE",
];

/// Implementation-neutral type description, tagged by `"class"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "class",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ProjectedType {
    Null,
    Struct { nested_types: Vec<FieldDefinition> },
    List { nested_types: Vec<FieldDefinition> },
    LargeList { nested_types: Vec<FieldDefinition> },
    FixedSizeList { nested_types: Vec<FieldDefinition> },
    Union {
        union_mode: UnionMode,
        union_type_ids: Vec<i32>,
        nested_types: Vec<FieldDefinition>,
    },
    Map {
        keys_sorted: bool,
        nested_types: Vec<FieldDefinition>,
    },
    Int { signed: bool, bit_width: i32 },
    Float,
    Double,
    Utf8,
    LargeUtf8,
    Binary,
    LargeBinary,
    FixedSizeBinary { byte_width: i32 },
    Bool,
    Decimal { precision: i32, scale: i32 },
    Date { date_unit: DateUnit },
    Time { time_unit: TimeUnit, bit_width: i32 },
    Timestamp {
        time_unit: TimeUnit,
        time_zone: Option<String>,
    },
    Interval { interval_unit: IntervalUnit },
    Duration { time_unit: TimeUnit },
    None,
}

impl ProjectedType {
    /// The `"class"` tag this value serializes with.
    pub fn class(&self) -> &'static str {
        match self {
            ProjectedType::Null => "NULL",
            ProjectedType::Struct { .. } => "STRUCT",
            ProjectedType::List { .. } => "LIST",
            ProjectedType::LargeList { .. } => "LARGE_LIST",
            ProjectedType::FixedSizeList { .. } => "FIXED_SIZE_LIST",
            ProjectedType::Union { .. } => "UNION",
            ProjectedType::Map { .. } => "MAP",
            ProjectedType::Int { .. } => "INT",
            ProjectedType::Float => "FLOAT",
            ProjectedType::Double => "DOUBLE",
            ProjectedType::Utf8 => "UTF8",
            ProjectedType::LargeUtf8 => "LARGE_UTF8",
            ProjectedType::Binary => "BINARY",
            ProjectedType::LargeBinary => "LARGE_BINARY",
            ProjectedType::FixedSizeBinary { .. } => "FIXED_SIZE_BINARY",
            ProjectedType::Bool => "BOOL",
            ProjectedType::Decimal { .. } => "DECIMAL",
            ProjectedType::Date { .. } => "DATE",
            ProjectedType::Time { .. } => "TIME",
            ProjectedType::Timestamp { .. } => "TIMESTAMP",
            ProjectedType::Interval { .. } => "INTERVAL",
            ProjectedType::Duration { .. } => "DURATION",
            ProjectedType::None => "NONE",
        }
    }

    /// Child definitions for container classes, empty otherwise.
    pub fn nested(&self) -> &[FieldDefinition] {
        match self {
            ProjectedType::Struct { nested_types }
            | ProjectedType::List { nested_types }
            | ProjectedType::LargeList { nested_types }
            | ProjectedType::FixedSizeList { nested_types }
            | ProjectedType::Union { nested_types, .. }
            | ProjectedType::Map { nested_types, .. } => nested_types,
            _ => &[],
        }
    }
}

/// A named field: its name, its projected type keys inlined, and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub data_type: ProjectedType,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl FieldDefinition {
    /// Names of this field and all nested fields, depth first, in declaration order.
    pub fn flattened_names(&self) -> Vec<String> {
        let mut names = vec![self.name.clone()];
        for child in self.data_type.nested() {
            names.extend(child.flattened_names());
        }
        names
    }
}

/// Projected form of a whole schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedSchema {
    pub fields: Vec<FieldDefinition>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// A projected schema paired with the dataset it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    pub dataset_path: String,
    pub schema: ProjectedSchema,
}
