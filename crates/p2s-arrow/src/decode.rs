//! Binary schema decoding.
//!
//! The embedded schema is a root Arrow IPC `Schema` flatbuffer table. Decoding
//! verifies the buffer and walks its fields into a [`SchemaTree`]. Type ids the
//! projector has no class for are preserved as [`FieldType::Unrecognized`].

use arrow_ipc as fb;
use base64::{Engine as _, engine::general_purpose};
use flatbuffers::VerifierOptions;
use tracing::debug;

use p2s_model::{
    DateUnit, FieldNode, FieldType, IntervalUnit, Metadata, Precision, SchemaTree, TimeUnit,
    UnionMode,
};

use crate::error::{Result, SchemaError};

/// Table nesting the verifier accepts. Each nested field adds one level.
const MAX_TABLE_DEPTH: usize = 1024;

/// Decode a base64-encoded schema.
///
/// Surrounding whitespace is ignored; anything else outside the standard
/// alphabet is an error.
pub fn decode_schema_base64(text: &str) -> Result<SchemaTree> {
    let bytes = general_purpose::STANDARD.decode(text.trim().as_bytes())?;
    decode_schema(&bytes)
}

/// Decode raw schema flatbuffer bytes.
pub fn decode_schema(bytes: &[u8]) -> Result<SchemaTree> {
    let schema = fb::root_as_schema_with_opts(&verifier_options(), bytes)
        .map_err(|e| SchemaError::invalid_flatbuffer(e.to_string().trim_end()))?;

    let mut fields = Vec::new();
    if let Some(fb_fields) = schema.fields() {
        for fb_field in fb_fields.iter() {
            fields.push(decode_field(fb_field)?);
        }
    }
    let metadata = decode_metadata(schema.custom_metadata().map(|entries| entries.iter()));

    debug!(
        bytes = bytes.len(),
        fields = fields.len(),
        "decoded binary schema"
    );
    Ok(SchemaTree { fields, metadata })
}

fn verifier_options() -> VerifierOptions {
    VerifierOptions {
        max_depth: MAX_TABLE_DEPTH,
        ..Default::default()
    }
}

fn decode_field(field: fb::Field<'_>) -> Result<FieldNode> {
    let name = field.name().unwrap_or_default().to_string();
    let data_type = decode_type(&field, &name)?;

    let mut children = Vec::new();
    if let Some(fb_children) = field.children() {
        for child in fb_children.iter() {
            children.push(decode_field(child)?);
        }
    }

    Ok(FieldNode {
        nullable: field.nullable(),
        data_type,
        children,
        metadata: decode_metadata(field.custom_metadata().map(|entries| entries.iter())),
        name,
    })
}

fn decode_type(field: &fb::Field<'_>, name: &str) -> Result<FieldType> {
    let type_type = field.type_type();
    let data_type = match type_type {
        fb::Type::NONE => FieldType::None,
        fb::Type::Null => FieldType::Null,
        fb::Type::Struct_ => FieldType::Struct,
        fb::Type::List => FieldType::List,
        fb::Type::LargeList => FieldType::LargeList,
        fb::Type::Utf8 => FieldType::Utf8,
        fb::Type::LargeUtf8 => FieldType::LargeUtf8,
        fb::Type::Binary => FieldType::Binary,
        fb::Type::LargeBinary => FieldType::LargeBinary,
        fb::Type::Bool => FieldType::Bool,
        fb::Type::FixedSizeList => {
            let list = require(field.type_as_fixed_size_list(), name, type_type)?;
            FieldType::FixedSizeList {
                list_size: list.listSize(),
            }
        }
        fb::Type::Union => {
            let union = require(field.type_as_union(), name, type_type)?;
            let mode = match union.mode() {
                fb::UnionMode::Sparse => UnionMode::Sparse,
                fb::UnionMode::Dense => UnionMode::Dense,
                other => {
                    return Err(SchemaError::unsupported_parameter(
                        name,
                        "union mode",
                        other.0,
                    ));
                }
            };
            let type_ids = union
                .typeIds()
                .map(|ids| ids.iter().collect())
                .unwrap_or_default();
            FieldType::Union { mode, type_ids }
        }
        fb::Type::Map => {
            let map = require(field.type_as_map(), name, type_type)?;
            FieldType::Map {
                keys_sorted: map.keysSorted(),
            }
        }
        fb::Type::Int => {
            let int = require(field.type_as_int(), name, type_type)?;
            FieldType::Int {
                signed: int.is_signed(),
                bit_width: int.bitWidth(),
            }
        }
        fb::Type::FloatingPoint => {
            let float = require(field.type_as_floating_point(), name, type_type)?;
            let precision = match float.precision() {
                fb::Precision::HALF => Precision::Half,
                fb::Precision::SINGLE => Precision::Single,
                fb::Precision::DOUBLE => Precision::Double,
                other => Precision::Other(other.0),
            };
            FieldType::FloatingPoint { precision }
        }
        fb::Type::FixedSizeBinary => {
            let binary = require(field.type_as_fixed_size_binary(), name, type_type)?;
            FieldType::FixedSizeBinary {
                byte_width: binary.byteWidth(),
            }
        }
        fb::Type::Decimal => {
            let decimal = require(field.type_as_decimal(), name, type_type)?;
            FieldType::Decimal {
                precision: decimal.precision(),
                scale: decimal.scale(),
                bit_width: decimal.bitWidth(),
            }
        }
        fb::Type::Date => {
            let date = require(field.type_as_date(), name, type_type)?;
            let unit = match date.unit() {
                fb::DateUnit::DAY => DateUnit::Day,
                fb::DateUnit::MILLISECOND => DateUnit::Millisecond,
                other => {
                    return Err(SchemaError::unsupported_parameter(
                        name,
                        "date unit",
                        other.0,
                    ));
                }
            };
            FieldType::Date { unit }
        }
        fb::Type::Time => {
            let time = require(field.type_as_time(), name, type_type)?;
            FieldType::Time {
                unit: time_unit(time.unit(), name)?,
                bit_width: time.bitWidth(),
            }
        }
        fb::Type::Timestamp => {
            let timestamp = require(field.type_as_timestamp(), name, type_type)?;
            FieldType::Timestamp {
                unit: time_unit(timestamp.unit(), name)?,
                timezone: timestamp.timezone().map(str::to_string),
            }
        }
        fb::Type::Interval => {
            let interval = require(field.type_as_interval(), name, type_type)?;
            let unit = match interval.unit() {
                fb::IntervalUnit::YEAR_MONTH => IntervalUnit::YearMonth,
                fb::IntervalUnit::DAY_TIME => IntervalUnit::DayTime,
                fb::IntervalUnit::MONTH_DAY_NANO => IntervalUnit::MonthDayNano,
                other => {
                    return Err(SchemaError::unsupported_parameter(
                        name,
                        "interval unit",
                        other.0,
                    ));
                }
            };
            FieldType::Interval { unit }
        }
        fb::Type::Duration => {
            let duration = require(field.type_as_duration(), name, type_type)?;
            FieldType::Duration {
                unit: time_unit(duration.unit(), name)?,
            }
        }
        other => FieldType::Unrecognized { type_id: other.0 },
    };
    Ok(data_type)
}

fn time_unit(unit: fb::TimeUnit, name: &str) -> Result<TimeUnit> {
    match unit {
        fb::TimeUnit::SECOND => Ok(TimeUnit::Second),
        fb::TimeUnit::MILLISECOND => Ok(TimeUnit::Millisecond),
        fb::TimeUnit::MICROSECOND => Ok(TimeUnit::Microsecond),
        fb::TimeUnit::NANOSECOND => Ok(TimeUnit::Nanosecond),
        other => Err(SchemaError::unsupported_parameter(name, "time unit", other.0)),
    }
}

/// Unwrap the parameter table for a field's type tag.
///
/// The verifier already rejects a tag whose table is absent, so the error
/// only stands in for the `Option` the generated accessors return.
fn require<T>(table: Option<T>, name: &str, type_type: fb::Type) -> Result<T> {
    table.ok_or_else(|| SchemaError::MissingTypeTable {
        field: name.to_string(),
        type_name: type_type.variant_name().unwrap_or("unknown"),
    })
}

fn decode_metadata<'a, I>(entries: Option<I>) -> Metadata
where
    I: Iterator<Item = fb::KeyValue<'a>>,
{
    entries
        .into_iter()
        .flatten()
        .map(|kv| {
            (
                kv.key().unwrap_or_default().to_string(),
                kv.value().unwrap_or_default().to_string(),
            )
        })
        .collect()
}
