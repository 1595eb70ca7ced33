//! Fixed integer widths and the free-standing integer codec.

use std::fmt;

use crate::error::{OctetError, OctetResult};

/// Width of an unsigned big-endian integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
}

impl Width {
    /// Parses a width from a bit count.
    pub const fn from_bits(bits: u32) -> OctetResult<Self> {
        match bits {
            8 => Ok(Self::U8),
            16 => Ok(Self::U16),
            32 => Ok(Self::U32),
            64 => Ok(Self::U64),
            _ => Err(OctetError::InvalidWidth { bits }),
        }
    }

    /// Number of bytes occupied on the wire.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Number of bits occupied on the wire.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Largest value representable in this width.
    #[must_use]
    pub const fn max(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }

    /// Returns `true` if `value` fits in this width.
    #[must_use]
    pub const fn fits(self, value: u64) -> bool {
        value <= self.max()
    }

    /// Returns `value` unchanged if it fits, or a range error.
    pub const fn check(self, value: u64) -> OctetResult<u64> {
        if self.fits(value) {
            Ok(value)
        } else {
            Err(OctetError::ValueOutOfRange { value, width: self })
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/// Encodes `value` as a big-endian integer of the given width.
pub fn encode_uint(value: u64, width: Width) -> OctetResult<Vec<u8>> {
    let value = width.check(value)?;
    let bytes = value.to_be_bytes();
    Ok(bytes[8 - width.bytes()..].to_vec())
}

/// Decodes a big-endian integer at `offset`, returning the value and the
/// offset just past it.
pub fn decode_uint(buf: &[u8], offset: usize, width: Width) -> OctetResult<(u64, usize)> {
    let available = buf.len().saturating_sub(offset);
    if width.bytes() > available {
        return Err(OctetError::Truncated {
            requested: width.bytes(),
            available,
        });
    }
    let value = buf[offset..offset + width.bytes()]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
    Ok((value, offset + width.bytes()))
}
