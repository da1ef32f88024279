//! Decoded schema tree.
//!
//! A [`SchemaTree`] is the in-memory form of an embedded binary schema: an
//! ordered list of [`FieldNode`]s, each carrying a [`FieldType`] with its
//! variant-specific parameters, nested children and string metadata.

use std::collections::BTreeMap;

use serde::Serialize;

/// String key/value annotations carried by fields and schemas.
pub type Metadata = BTreeMap<String, String>;

/// An ordered sequence of top-level fields plus schema-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTree {
    pub fields: Vec<FieldNode>,
    pub metadata: Metadata,
}

impl SchemaTree {
    #[must_use]
    pub fn new(fields: Vec<FieldNode>) -> Self {
        Self {
            fields,
            metadata: Metadata::new(),
        }
    }

    /// Top-level field names in positional order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// One column or nested field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub name: String,
    pub nullable: bool,
    pub data_type: FieldType,
    /// Ordered children; empty unless `data_type` is a container.
    pub children: Vec<FieldNode>,
    pub metadata: Metadata,
}

impl FieldNode {
    /// Create a nullable leaf field without metadata.
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            data_type,
            children: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<FieldNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Type of a field, with variant-specific parameters.
///
/// The variant set is closed. Type ids the decoder does not know are kept as
/// [`FieldType::Unrecognized`] and rejected during projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    None,
    Null,
    Struct,
    List,
    LargeList,
    FixedSizeList { list_size: i32 },
    Union { mode: UnionMode, type_ids: Vec<i32> },
    Map { keys_sorted: bool },
    Int { signed: bool, bit_width: i32 },
    FloatingPoint { precision: Precision },
    Utf8,
    LargeUtf8,
    Binary,
    LargeBinary,
    FixedSizeBinary { byte_width: i32 },
    Bool,
    Decimal {
        precision: i32,
        scale: i32,
        bit_width: i32,
    },
    Date { unit: DateUnit },
    Time { unit: TimeUnit, bit_width: i32 },
    Timestamp {
        unit: TimeUnit,
        timezone: Option<String>,
    },
    Interval { unit: IntervalUnit },
    Duration { unit: TimeUnit },
    Unrecognized { type_id: u8 },
}

/// Floating point precision as recorded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Half,
    Single,
    Double,
    /// A precision value outside the known enumeration.
    Other(i16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateUnit {
    Day,
    Millisecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalUnit {
    YearMonth,
    DayTime,
    MonthDayNano,
}

/// Physical layout of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnionMode {
    Sparse,
    Dense,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_children_in_order() {
        let node = FieldNode::new("s", FieldType::Struct).with_children(vec![
            FieldNode::new("b", FieldType::Bool),
            FieldNode::new("a", FieldType::Utf8),
        ]);
        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn units_serialize_as_upper_snake_case() {
        assert_eq!(
            serde_json::to_string(&IntervalUnit::MonthDayNano).expect("serialize"),
            "\"MONTH_DAY_NANO\""
        );
        assert_eq!(
            serde_json::to_string(&TimeUnit::Microsecond).expect("serialize"),
            "\"MICROSECOND\""
        );
        assert_eq!(
            serde_json::to_string(&UnionMode::Dense).expect("serialize"),
            "\"Dense\""
        );
    }
}
