//! Error types for schema decoding and projection.

use thiserror::Error;

/// Errors raised while decoding an embedded schema or projecting its types.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The base64 text could not be decoded.
    #[error("invalid base64 schema payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a valid schema flatbuffer.
    #[error("invalid binary schema: {message}")]
    InvalidFlatbuffer { message: String },

    /// A field names a type whose parameter table is absent.
    #[error("field '{field}' declares type {type_name} without its type table")]
    MissingTypeTable {
        field: String,
        type_name: &'static str,
    },

    /// A unit or mode enumeration holds a value outside the format's definition.
    #[error("field '{field}' has unsupported {parameter} value {value}")]
    UnsupportedParameter {
        field: String,
        parameter: &'static str,
        value: i64,
    },

    /// Floating point precision other than half, single or double.
    #[error("field '{field}' has unsupported floating point precision {precision}")]
    UnsupportedPrecision { field: String, precision: i16 },

    /// The schema declares a type id that has no projection.
    #[error("field '{field}' has unrecognized type id {type_id}")]
    UnsupportedType { field: String, type_id: u8 },
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

impl SchemaError {
    /// Create an InvalidFlatbuffer error.
    pub fn invalid_flatbuffer(message: impl Into<String>) -> Self {
        Self::InvalidFlatbuffer {
            message: message.into(),
        }
    }

    /// Create an UnsupportedParameter error.
    pub fn unsupported_parameter(
        field: impl Into<String>,
        parameter: &'static str,
        value: impl Into<i64>,
    ) -> Self {
        Self::UnsupportedParameter {
            field: field.into(),
            parameter,
            value: value.into(),
        }
    }

    /// True for errors raised while reading the payload rather than projecting it.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Base64(_)
                | Self::InvalidFlatbuffer { .. }
                | Self::MissingTypeTable { .. }
                | Self::UnsupportedParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::invalid_flatbuffer("range out of bounds");
        assert_eq!(format!("{err}"), "invalid binary schema: range out of bounds");

        let err = SchemaError::UnsupportedType {
            field: "col".to_string(),
            type_id: 42,
        };
        assert_eq!(format!("{err}"), "field 'col' has unrecognized type id 42");
    }

    #[test]
    fn test_decode_error_classification() {
        assert!(SchemaError::invalid_flatbuffer("x").is_decode_error());
        assert!(SchemaError::unsupported_parameter("f", "time unit", 9i16).is_decode_error());
        assert!(
            !SchemaError::UnsupportedPrecision {
                field: "f".to_string(),
                precision: 7,
            }
            .is_decode_error()
        );
    }
}
