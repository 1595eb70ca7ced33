//! Message header.

use codec::{CodecLimits, StructValue};
use octets::ByteReader;
use schema::StructSchema;

use crate::error::WireResult;

/// Header size in bytes: version(1) + type(1) + length(2) + xid(4).
pub const HEADER_SIZE: usize = 1 + 1 + 2 + 4;

/// The fixed envelope in front of every message.
///
/// Each protocol version declares its own header schema with the fields
/// `version`, `type`, `length` and `xid`; this is the decoded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    pub version: u8,
    pub message_type: u8,
    /// Total message length including the header.
    pub length: u16,
    pub xid: u32,
}

impl Header {
    #[must_use]
    pub const fn new(version: u8, message_type: u8, xid: u32) -> Self {
        Self {
            version,
            message_type,
            length: HEADER_SIZE as u16,
            xid,
        }
    }

    /// Reads the version byte without decoding the rest.
    #[must_use]
    pub fn peek_version(buf: &[u8]) -> Option<u8> {
        buf.first().copied()
    }

    /// Decodes a header with a version's header schema.
    pub fn unpack(schema: &'static StructSchema, buf: &[u8]) -> WireResult<Self> {
        let mut reader = ByteReader::new(buf);
        let value = StructValue::unpack(schema, &mut reader, &CodecLimits::default())?;
        Self::from_value(&value)
    }

    /// Builds the typed view from a decoded header struct.
    pub fn from_value(value: &StructValue) -> WireResult<Self> {
        Ok(Self {
            version: narrow(value.uint("version")?),
            message_type: narrow(value.uint("type")?),
            length: narrow(value.uint("length")?),
            xid: narrow(value.uint("xid")?),
        })
    }

    /// Builds a header struct for `schema` carrying these fields.
    pub fn to_value(&self, schema: &'static StructSchema) -> WireResult<StructValue> {
        Ok(StructValue::new(schema)
            .with("version", self.version)?
            .with("type", self.message_type)?
            .with("length", self.length)?
            .with("xid", self.xid)?)
    }

    /// Encodes the header with a version's header schema.
    pub fn pack(&self, schema: &'static StructSchema) -> WireResult<Vec<u8>> {
        Ok(self.to_value(schema)?.pack()?)
    }

    /// Declared body length.
    #[must_use]
    pub const fn body_len(&self) -> usize {
        (self.length as usize).saturating_sub(HEADER_SIZE)
    }
}

/// Header fields are decoded from schema fields of the same width, so the
/// conversion never truncates.
fn narrow<T: TryFrom<u64> + Default>(value: u64) -> T {
    T::try_from(value).unwrap_or_default()
}
