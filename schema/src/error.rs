//! Schema validation errors.

use octets::Width;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when validating a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields of one struct share a name.
    #[error("duplicate field `{field}` in `{schema}`")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },

    /// A field that consumes the rest of its range is followed by more fields.
    #[error("field `{field}` in `{schema}` consumes the remaining bytes but is not last")]
    UnboundedFieldNotLast {
        schema: &'static str,
        field: &'static str,
    },

    /// A field refers to a sibling that is missing, later, or not an integer.
    #[error("field `{field}` in `{schema}` refers to `{reference}`, which is not an earlier integer field")]
    InvalidReference {
        schema: &'static str,
        field: &'static str,
        reference: &'static str,
    },

    /// The declared length field is missing or not an integer.
    #[error("length field `{field}` of `{schema}` is not an integer field")]
    InvalidLengthField {
        schema: &'static str,
        field: &'static str,
    },

    /// A default value does not fit the field width.
    #[error("default {default} of `{schema}.{field}` does not fit in {width}")]
    DefaultOutOfRange {
        schema: &'static str,
        field: &'static str,
        default: u64,
        width: Width,
    },

    /// A variable list uses an element that can occupy zero bytes.
    #[error("list `{field}` in `{schema}` has a zero-sized element type `{element}`")]
    ZeroSizedElement {
        schema: &'static str,
        field: &'static str,
        element: &'static str,
    },

    /// Trailing alignment is zero or not a power of two.
    #[error("alignment {align} of `{schema}` is not a power of two")]
    InvalidAlignment { schema: &'static str, align: usize },

    /// A body dispatch table lists the same discriminant twice.
    #[error("dispatch `{dispatch}` lists discriminant {value} more than once")]
    DuplicateCase { dispatch: &'static str, value: u64 },
}
