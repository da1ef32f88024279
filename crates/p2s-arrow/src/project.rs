//! Projection of decoded field types into the `"class"` vocabulary.

use p2s_model::{
    FieldDefinition, FieldNode, FieldType, Precision, ProjectedSchema, ProjectedType, SchemaTree,
};

use crate::error::{Result, SchemaError};

/// Project every top-level field of a schema, keeping positional order.
pub fn project_schema(tree: &SchemaTree) -> Result<ProjectedSchema> {
    let fields = tree
        .fields
        .iter()
        .map(project_field)
        .collect::<Result<Vec<_>>>()?;
    Ok(ProjectedSchema {
        fields,
        metadata: tree.metadata.clone(),
    })
}

/// Project a field into its name, type and metadata.
pub fn project_field(node: &FieldNode) -> Result<FieldDefinition> {
    Ok(FieldDefinition {
        name: node.name.clone(),
        data_type: project_type(node)?,
        metadata: node.metadata.clone(),
    })
}

/// Project the type of a field, recursing into container children.
///
/// # Errors
///
/// Fails with [`SchemaError::UnsupportedPrecision`] for a floating point
/// precision outside half/single/double and with
/// [`SchemaError::UnsupportedType`] for an unrecognized type id, whether on
/// this node or any descendant.
pub fn project_type(node: &FieldNode) -> Result<ProjectedType> {
    let projected = match &node.data_type {
        FieldType::None => ProjectedType::None,
        FieldType::Null => ProjectedType::Null,
        FieldType::Struct => ProjectedType::Struct {
            nested_types: project_children(node)?,
        },
        FieldType::List => ProjectedType::List {
            nested_types: project_children(node)?,
        },
        FieldType::LargeList => ProjectedType::LargeList {
            nested_types: project_children(node)?,
        },
        FieldType::FixedSizeList { .. } => ProjectedType::FixedSizeList {
            nested_types: project_children(node)?,
        },
        FieldType::Union { mode, type_ids } => ProjectedType::Union {
            union_mode: *mode,
            union_type_ids: type_ids.clone(),
            nested_types: project_children(node)?,
        },
        // Map children (the entries struct and its key/value fields) keep their
        // own metadata; nothing is merged into the map field's metadata.
        FieldType::Map { keys_sorted } => ProjectedType::Map {
            keys_sorted: *keys_sorted,
            nested_types: project_children(node)?,
        },
        FieldType::Int { signed, bit_width } => ProjectedType::Int {
            signed: *signed,
            bit_width: *bit_width,
        },
        FieldType::FloatingPoint { precision } => match precision {
            Precision::Half | Precision::Single => ProjectedType::Float,
            Precision::Double => ProjectedType::Double,
            Precision::Other(value) => {
                return Err(SchemaError::UnsupportedPrecision {
                    field: node.name.clone(),
                    precision: *value,
                });
            }
        },
        FieldType::Utf8 => ProjectedType::Utf8,
        FieldType::LargeUtf8 => ProjectedType::LargeUtf8,
        FieldType::Binary => ProjectedType::Binary,
        FieldType::LargeBinary => ProjectedType::LargeBinary,
        FieldType::FixedSizeBinary { byte_width } => ProjectedType::FixedSizeBinary {
            byte_width: *byte_width,
        },
        FieldType::Bool => ProjectedType::Bool,
        FieldType::Decimal {
            precision, scale, ..
        } => ProjectedType::Decimal {
            precision: *precision,
            scale: *scale,
        },
        FieldType::Date { unit } => ProjectedType::Date { date_unit: *unit },
        FieldType::Time { unit, bit_width } => ProjectedType::Time {
            time_unit: *unit,
            bit_width: *bit_width,
        },
        FieldType::Timestamp { unit, timezone } => ProjectedType::Timestamp {
            time_unit: *unit,
            time_zone: timezone.clone(),
        },
        FieldType::Interval { unit } => ProjectedType::Interval {
            interval_unit: *unit,
        },
        FieldType::Duration { unit } => ProjectedType::Duration { time_unit: *unit },
        FieldType::Unrecognized { type_id } => {
            return Err(SchemaError::UnsupportedType {
                field: node.name.clone(),
                type_id: *type_id,
            });
        }
    };
    Ok(projected)
}

fn project_children(node: &FieldNode) -> Result<Vec<FieldDefinition>> {
    node.children.iter().map(project_field).collect()
}
