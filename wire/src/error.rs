//! Error types for message framing and resolution.

use codec::{CodecError, ErrorKind, LimitKind};
use schema::SchemaError;
use thiserror::Error;

use crate::message::MessageState;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while resolving, packing or unpacking messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WireError {
    /// Header or body codec failure.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A registered schema failed validation.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// No schemas are registered for this protocol version.
    #[error("unsupported protocol version 0x{version:02x}")]
    UnsupportedVersion { version: u8 },

    /// The message type is not registered for the version.
    #[error("unknown message type {message_type} for version 0x{version:02x}")]
    UnknownMessageType { version: u8, message_type: u8 },

    /// The header declares a length shorter than the header itself.
    #[error("declared message length {length} is below the minimum {min}")]
    InvalidLength { length: usize, min: usize },

    /// The buffer ends before the declared message length.
    #[error("message declares {declared} bytes but only {available} are available")]
    Truncated { declared: usize, available: usize },

    /// A wire limit was exceeded.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A version was registered twice.
    #[error("version 0x{version:02x} is already registered")]
    DuplicateVersion { version: u8 },

    /// Two different layouts were registered under one type code.
    #[error("conflicting layouts registered for type {message_type} of version 0x{version:02x}")]
    ConflictingSchema { version: u8, message_type: u8 },

    /// The message is not in a state that allows the operation.
    #[error("message is {found}, expected {expected}")]
    InvalidState {
        expected: MessageState,
        found: MessageState,
    },
}

impl WireError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Codec(err) => err.kind(),
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::UnknownMessageType { .. } => ErrorKind::UnknownMessageType,
            Self::InvalidLength { .. } | Self::LimitsExceeded { .. } => ErrorKind::Length,
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::Schema(_)
            | Self::DuplicateVersion { .. }
            | Self::ConflictingSchema { .. }
            | Self::InvalidState { .. } => ErrorKind::Schema,
        }
    }
}
