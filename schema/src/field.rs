//! Field kinds and field definitions.

use octets::Width;

use crate::binding::{BitmaskDef, EnumDef};
use crate::dispatch::BodyDispatch;
use crate::schema::StructSchema;

/// How many bytes or elements a list occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ListExtent {
    /// Elements are decoded until the enclosing range is exhausted.
    Remaining,
    /// Exactly this many elements.
    Fixed(usize),
    /// Element count is carried by an earlier integer field.
    CountFrom(&'static str),
    /// Byte length is carried by an earlier integer field.
    BytesFrom(&'static str),
}

/// A homogeneous list of struct elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListDef {
    pub element: &'static StructSchema,
    pub extent: ListExtent,
}

impl ListDef {
    #[must_use]
    pub const fn new(element: &'static StructSchema, extent: ListExtent) -> Self {
        Self { element, extent }
    }
}

/// The encoding of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    /// Unsigned big-endian integer.
    UInt(Width),
    /// Integer restricted to a named value table.
    Enum(Width, &'static EnumDef),
    /// Integer whose bits are named flags.
    Bitmask(Width, &'static BitmaskDef),
    /// Zero bytes for alignment. Carries no value.
    Pad(usize),
    /// Fixed-length raw bytes (e.g. hardware addresses).
    Bytes(usize),
    /// Null-padded string in a fixed-length field.
    Str(usize),
    /// Raw bytes up to the end of the enclosing range.
    Blob,
    /// Nested struct.
    Struct(&'static StructSchema),
    /// List of nested structs.
    List(ListDef),
    /// Body whose layout depends on an earlier discriminant field.
    Body(&'static BodyDispatch),
}

impl FieldKind {
    /// Size on the wire, if it does not depend on the value.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::UInt(width) | Self::Enum(width, _) | Self::Bitmask(width, _) => {
                Some(width.bytes())
            }
            Self::Pad(len) | Self::Bytes(len) | Self::Str(len) => Some(*len),
            Self::Struct(schema) => schema.fixed_size(),
            Self::List(ListDef {
                element,
                extent: ListExtent::Fixed(count),
            }) => element.fixed_size().map(|size| size * count),
            Self::Blob | Self::List(_) | Self::Body(_) => None,
        }
    }

    /// Smallest size the field can occupy on the wire.
    #[must_use]
    pub fn min_size(&self) -> usize {
        match self {
            Self::Struct(schema) => schema.min_size(),
            Self::List(ListDef {
                element,
                extent: ListExtent::Fixed(count),
            }) => element.min_size() * count,
            Self::Blob | Self::List(_) | Self::Body(_) => 0,
            _ => self.fixed_size().unwrap_or(0),
        }
    }

    /// Integer width for integer-valued kinds.
    #[must_use]
    pub const fn width(&self) -> Option<Width> {
        match self {
            Self::UInt(width) | Self::Enum(width, _) | Self::Bitmask(width, _) => Some(*width),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.width().is_some()
    }

    /// Returns `true` if the field swallows the rest of its enclosing range.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(
            self,
            Self::Blob
                | Self::Body(_)
                | Self::List(ListDef {
                    extent: ListExtent::Remaining,
                    ..
                })
        )
    }

    /// Short name of the kind, for diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::Enum(..) => "enum",
            Self::Bitmask(..) => "bitmask",
            Self::Pad(_) => "pad",
            Self::Bytes(_) => "bytes",
            Self::Str(_) => "string",
            Self::Blob => "blob",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
            Self::Body(_) => "body",
        }
    }
}

/// A named field within a struct schema.
///
/// `default` is used for integer kinds when no value has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: u64,
}

impl FieldDef {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            default: 0,
        }
    }

    #[must_use]
    pub const fn uint(name: &'static str, width: Width) -> Self {
        Self::new(name, FieldKind::UInt(width))
    }

    #[must_use]
    pub const fn u8(name: &'static str) -> Self {
        Self::new(name, FieldKind::UInt(Width::U8))
    }

    #[must_use]
    pub const fn u16(name: &'static str) -> Self {
        Self::new(name, FieldKind::UInt(Width::U16))
    }

    #[must_use]
    pub const fn u32(name: &'static str) -> Self {
        Self::new(name, FieldKind::UInt(Width::U32))
    }

    #[must_use]
    pub const fn u64(name: &'static str) -> Self {
        Self::new(name, FieldKind::UInt(Width::U64))
    }

    #[must_use]
    pub const fn enumeration(name: &'static str, width: Width, def: &'static EnumDef) -> Self {
        Self::new(name, FieldKind::Enum(width, def))
    }

    #[must_use]
    pub const fn bitmask(name: &'static str, width: Width, def: &'static BitmaskDef) -> Self {
        Self::new(name, FieldKind::Bitmask(width, def))
    }

    #[must_use]
    pub const fn pad(name: &'static str, len: usize) -> Self {
        Self::new(name, FieldKind::Pad(len))
    }

    #[must_use]
    pub const fn bytes(name: &'static str, len: usize) -> Self {
        Self::new(name, FieldKind::Bytes(len))
    }

    #[must_use]
    pub const fn string(name: &'static str, len: usize) -> Self {
        Self::new(name, FieldKind::Str(len))
    }

    #[must_use]
    pub const fn blob(name: &'static str) -> Self {
        Self::new(name, FieldKind::Blob)
    }

    #[must_use]
    pub const fn nested(name: &'static str, schema: &'static StructSchema) -> Self {
        Self::new(name, FieldKind::Struct(schema))
    }

    #[must_use]
    pub const fn list(name: &'static str, element: &'static StructSchema, extent: ListExtent) -> Self {
        Self::new(name, FieldKind::List(ListDef::new(element, extent)))
    }

    #[must_use]
    pub const fn body(name: &'static str, dispatch: &'static BodyDispatch) -> Self {
        Self::new(name, FieldKind::Body(dispatch))
    }

    /// Sets the value packed when the field is left unassigned.
    #[must_use]
    pub const fn default(self, default: u64) -> Self {
        Self { default, ..self }
    }

    #[must_use]
    pub const fn is_pad(&self) -> bool {
        matches!(self.kind, FieldKind::Pad(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Variant;

    static FLAGS: BitmaskDef = BitmaskDef::new("Flags", &[Variant::new("A", 1)]);
    static PAIR: StructSchema =
        StructSchema::new("Pair", &[FieldDef::u16("a"), FieldDef::u16("b")]);

    #[test]
    fn integer_kinds_have_width_sizes() {
        assert_eq!(FieldDef::u8("a").kind.fixed_size(), Some(1));
        assert_eq!(FieldDef::u64("a").kind.fixed_size(), Some(8));
        let flags = FieldDef::bitmask("flags", Width::U32, &FLAGS);
        assert_eq!(flags.kind.fixed_size(), Some(4));
        assert!(flags.kind.is_integer());
    }

    #[test]
    fn byte_kinds_have_declared_sizes() {
        assert_eq!(FieldDef::pad("pad", 3).kind.fixed_size(), Some(3));
        assert_eq!(FieldDef::bytes("hw_addr", 6).kind.fixed_size(), Some(6));
        assert_eq!(FieldDef::string("name", 16).kind.fixed_size(), Some(16));
    }

    #[test]
    fn variable_kinds_have_no_fixed_size() {
        assert_eq!(FieldDef::blob("data").kind.fixed_size(), None);
        let list = FieldDef::list("pairs", &PAIR, ListExtent::Remaining);
        assert_eq!(list.kind.fixed_size(), None);
        assert_eq!(list.kind.min_size(), 0);
        assert!(list.kind.is_unbounded());
    }

    #[test]
    fn fixed_count_list_size() {
        let list = FieldDef::list("pairs", &PAIR, ListExtent::Fixed(3));
        assert_eq!(list.kind.fixed_size(), Some(12));
        assert!(!list.kind.is_unbounded());
    }

    #[test]
    fn default_builder() {
        let field = FieldDef::u16("length").default(88);
        assert_eq!(field.default, 88);
        assert_eq!(field.name, "length");
    }

    #[test]
    fn pad_detection() {
        assert!(FieldDef::pad("pad", 2).is_pad());
        assert!(!FieldDef::u8("x").is_pad());
        assert_eq!(FieldDef::pad("pad", 2).kind.describe(), "pad");
    }
}
