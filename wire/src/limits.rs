//! Configurable limits for bounded decoding.

use codec::CodecLimits;

/// Wire-level limits for message decoding.
///
/// `max_message_bytes` is checked against the declared header length before
/// the body is touched. Body structure limits live in [`CodecLimits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum declared message length in bytes.
    pub max_message_bytes: usize,

    /// Limits applied while decoding the body.
    pub codec: CodecLimits,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // The header length field is 16 bits wide.
            max_message_bytes: usize::from(u16::MAX),
            codec: CodecLimits::default(),
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_message_bytes: 4096,
            codec: CodecLimits::for_testing(),
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_message_bytes: usize::MAX,
            codec: CodecLimits::unlimited(),
        }
    }
}
