//! Error types for struct pack/unpack.

use std::fmt;

use octets::OctetError;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while packing or unpacking a struct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A primitive read or write failed on a field.
    #[error("field `{schema}.{field}`: {source}")]
    Primitive {
        schema: &'static str,
        field: &'static str,
        source: OctetError,
    },

    /// A value of the wrong kind was assigned to a field.
    #[error("field `{schema}.{field}` expects {expected}, got {found}")]
    TypeMismatch {
        schema: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The struct has no field with this name.
    #[error("`{schema}` has no field `{field}`")]
    UnknownField { schema: &'static str, field: String },

    /// A declared length is smaller than the struct can be.
    #[error("declared length {declared} of `{schema}` is below its minimum size {min}")]
    InvalidLength {
        schema: &'static str,
        declared: usize,
        min: usize,
    },

    /// Bytes were left over after a struct that must fill its range.
    #[error("{remaining} trailing bytes after `{schema}`")]
    TrailingBytes {
        schema: &'static str,
        remaining: usize,
    },

    /// A fixed-count list was given the wrong number of elements.
    #[error("list `{schema}.{field}` expects {expected} elements, got {actual}")]
    CountMismatch {
        schema: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A decoding limit was exceeded.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Which limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKind {
    ListElements,
    Depth,
    MessageBytes,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListElements => "list element",
            Self::Depth => "nesting depth",
            Self::MessageBytes => "message size",
        };
        f.write_str(name)
    }
}

/// Coarse classification shared by every layer's errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value does not fit its field.
    Range,
    /// A length is inconsistent with the data.
    Length,
    /// The buffer ended early.
    Truncated,
    /// The protocol version has no registered schemas.
    UnsupportedVersion,
    /// The message type is not registered for the version.
    UnknownMessageType,
    /// The value does not match the schema.
    Schema,
}

impl CodecError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Primitive { source, .. } => match source {
                OctetError::ValueOutOfRange { .. } => ErrorKind::Range,
                OctetError::LengthExceeded { .. } | OctetError::InteriorNul { .. } => {
                    ErrorKind::Length
                }
                OctetError::Truncated { .. } => ErrorKind::Truncated,
                OctetError::InvalidWidth { .. } => ErrorKind::Schema,
            },
            Self::TypeMismatch { .. } | Self::UnknownField { .. } => ErrorKind::Schema,
            Self::InvalidLength { .. }
            | Self::TrailingBytes { .. }
            | Self::CountMismatch { .. }
            | Self::LimitsExceeded { .. } => ErrorKind::Length,
        }
    }

    pub(crate) fn primitive(
        schema: &'static str,
        field: &'static str,
    ) -> impl Fn(OctetError) -> Self {
        move |source| Self::Primitive {
            schema,
            field,
            source,
        }
    }
}
