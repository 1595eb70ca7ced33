//! Decoded field values.

use std::fmt;

use schema::{BitmaskValue, EnumValue};

use crate::structs::StructValue;

/// The value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt(u64),
    Enum(EnumValue),
    Bitmask(BitmaskValue),
    /// Fixed-length raw bytes.
    Bytes(Vec<u8>),
    /// Null-padded string contents, kept as the bytes seen on the wire.
    Str(Vec<u8>),
    /// Raw bytes to the end of the enclosing range.
    Blob(Vec<u8>),
    Struct(StructValue),
    List(Vec<StructValue>),
    Body(Body),
}

impl Value {
    /// The raw number behind integer, enum and bitmask values.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(value) => Some(*value),
            Self::Enum(value) => Some(value.raw()),
            Self::Bitmask(value) => Some(value.raw()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) | Self::Str(bytes) | Self::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// String contents, when they are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[StructValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_body(&self) -> Option<&Body> {
        match self {
            Self::Body(body) => Some(body),
            _ => None,
        }
    }

    /// Short name of the value kind, for diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::Enum(_) => "enum",
            Self::Bitmask(_) => "bitmask",
            Self::Bytes(_) => "bytes",
            Self::Str(_) => "string",
            Self::Blob(_) => "blob",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
            Self::Body(_) => "body",
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<BitmaskValue> for Value {
    fn from(value: BitmaskValue) -> Self {
        Self::Bitmask(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into_bytes())
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Self::Struct(value)
    }
}

impl From<Vec<StructValue>> for Value {
    fn from(items: Vec<StructValue>) -> Self {
        Self::List(items)
    }
}

impl From<Body> for Value {
    fn from(body: Body) -> Self {
        Self::Body(body)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(value) => write!(f, "{value}"),
            Self::Enum(value) => write!(f, "{value}"),
            Self::Bitmask(value) => write!(f, "{value}"),
            Self::Bytes(bytes) => write_hex(f, bytes, ":"),
            Self::Str(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Self::Blob(bytes) => {
                f.write_str("0x")?;
                write_hex(f, bytes, "")
            }
            Self::Struct(value) => write!(f, "{value}"),
            Self::List(items) => write_items(f, items),
            Self::Body(body) => write!(f, "{body}"),
        }
    }
}

/// A discriminated body after resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// No bytes.
    Empty,
    /// One struct filling the body.
    Single(StructValue),
    /// Zero or more structs filling the body.
    Elements(Vec<StructValue>),
    /// Bytes kept as-is because the discriminant is not registered.
    Opaque(Vec<u8>),
}

impl Body {
    /// Encoded size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(value) => value.size(),
            Self::Elements(items) => items.iter().map(StructValue::size).sum(),
            Self::Opaque(bytes) => bytes.len(),
        }
    }

    /// Short name of the body kind, for diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Empty => "empty body",
            Self::Single(_) => "single body",
            Self::Elements(_) => "repeated body",
            Self::Opaque(_) => "opaque body",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("()"),
            Self::Single(value) => write!(f, "{value}"),
            Self::Elements(items) => write_items(f, items),
            Self::Opaque(bytes) => {
                f.write_str("opaque 0x")?;
                write_hex(f, bytes, "")
            }
        }
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8], sep: &str) -> fmt::Result {
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[StructValue]) -> fmt::Result {
    f.write_str("[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{EnumDef, Variant};

    static COLOR: EnumDef = EnumDef::new("Color", &[Variant::new("RED", 1)]);

    #[test]
    fn uint_views() {
        assert_eq!(Value::from(7u16).as_uint(), Some(7));
        assert_eq!(Value::Enum(COLOR.bind(1)).as_uint(), Some(1));
        assert_eq!(Value::Str(b"x".to_vec()).as_uint(), None);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Value::Bytes(vec![0, 0x1b, 0x21]).to_string(), "00:1b:21");
        assert_eq!(Value::Blob(vec![0xab, 0xcd]).to_string(), "0xabcd");
        assert_eq!(Value::Enum(COLOR.bind(1)).to_string(), "RED");
        assert_eq!(Value::from("eth0").to_string(), "\"eth0\"");
        assert_eq!(Body::Opaque(vec![1]).to_string(), "opaque 0x01");
        assert_eq!(Body::Empty.to_string(), "()");
    }

    #[test]
    fn str_view_requires_utf8() {
        let text = Value::from("s1-eth1");
        assert_eq!(text.as_str(), Some("s1-eth1"));
        assert_eq!(text.as_bytes(), Some(&b"s1-eth1"[..]));

        let latin1 = Value::Str(vec![0x65, 0xe9]);
        assert_eq!(latin1.as_str(), None);
        assert_eq!(latin1.as_bytes(), Some(&[0x65, 0xe9][..]));
    }

    #[test]
    fn body_sizes() {
        assert_eq!(Body::Empty.size(), 0);
        assert_eq!(Body::Opaque(vec![0; 5]).size(), 5);
        assert_eq!(Body::Elements(Vec::new()).size(), 0);
    }
}
