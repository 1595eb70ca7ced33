//! Error types for primitive encoding and decoding.

use thiserror::Error;

use crate::Width;

/// Result type for primitive codec operations.
pub type OctetResult<T> = Result<T, OctetError>;

/// Errors that can occur while encoding or decoding primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OctetError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    Truncated {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Value exceeds the range representable by the field width.
    #[error("value {value} cannot be represented in {width}")]
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Width of the target field.
        width: Width,
    },

    /// Input is longer than a fixed-length field allows.
    #[error("{len} bytes do not fit a fixed field of {max} bytes")]
    LengthExceeded {
        /// Length of the provided input.
        len: usize,
        /// Declared field length.
        max: usize,
    },

    /// A null-padded string value contains a null byte.
    #[error("string contains a null byte at offset {position}")]
    InteriorNul {
        /// Offset of the first null byte.
        position: usize,
    },

    /// Bit count is not one of the supported integer widths.
    #[error("invalid integer width of {bits} bits, expected 8, 16, 32 or 64")]
    InvalidWidth {
        /// The rejected bit count.
        bits: u32,
    },
}
