//! Deterministic schema fingerprints.

use blake3::Hasher;

use crate::dispatch::{BodyDispatch, BodyShape};
use crate::field::{FieldKind, ListExtent};
use crate::schema::StructSchema;

/// Computes a deterministic fingerprint of a struct layout.
///
/// Field names, kinds, widths, defaults and nested layouts all contribute.
/// Enum and bitmask tables contribute their names only, so adding a variant
/// does not change the fingerprint.
#[must_use]
pub fn schema_hash(schema: &StructSchema) -> u64 {
    let mut hasher = Hasher::new();
    write_struct(&mut hasher, schema);

    let hash = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(out)
}

fn write_struct(hasher: &mut Hasher, schema: &StructSchema) {
    write_str(hasher, schema.name);
    match schema.length_field {
        Some(name) => {
            write_u8(hasher, 1);
            write_str(hasher, name);
        }
        None => write_u8(hasher, 0),
    }
    if schema.align > 1 {
        write_u8(hasher, 2);
        write_u64(hasher, schema.align as u64);
    }
    write_u32(hasher, schema.fields.len() as u32);

    for field in schema.fields {
        write_str(hasher, field.name);
        write_u64(hasher, field.default);
        write_kind(hasher, field.kind);
    }
}

fn write_kind(hasher: &mut Hasher, kind: FieldKind) {
    match kind {
        FieldKind::UInt(width) => {
            write_u8(hasher, 0);
            write_u8(hasher, width.bytes() as u8);
        }
        FieldKind::Enum(width, def) => {
            write_u8(hasher, 1);
            write_u8(hasher, width.bytes() as u8);
            write_str(hasher, def.name);
        }
        FieldKind::Bitmask(width, def) => {
            write_u8(hasher, 2);
            write_u8(hasher, width.bytes() as u8);
            write_str(hasher, def.name);
        }
        FieldKind::Pad(len) => {
            write_u8(hasher, 3);
            write_u64(hasher, len as u64);
        }
        FieldKind::Bytes(len) => {
            write_u8(hasher, 4);
            write_u64(hasher, len as u64);
        }
        FieldKind::Str(len) => {
            write_u8(hasher, 5);
            write_u64(hasher, len as u64);
        }
        FieldKind::Blob => write_u8(hasher, 6),
        FieldKind::Struct(schema) => {
            write_u8(hasher, 7);
            write_struct(hasher, schema);
        }
        FieldKind::List(list) => {
            write_u8(hasher, 8);
            write_extent(hasher, list.extent);
            write_struct(hasher, list.element);
        }
        FieldKind::Body(dispatch) => {
            write_u8(hasher, 9);
            write_dispatch(hasher, dispatch);
        }
    }
}

fn write_extent(hasher: &mut Hasher, extent: ListExtent) {
    match extent {
        ListExtent::Remaining => write_u8(hasher, 0),
        ListExtent::Fixed(count) => {
            write_u8(hasher, 1);
            write_u64(hasher, count as u64);
        }
        ListExtent::CountFrom(name) => {
            write_u8(hasher, 2);
            write_str(hasher, name);
        }
        ListExtent::BytesFrom(name) => {
            write_u8(hasher, 3);
            write_str(hasher, name);
        }
    }
}

fn write_dispatch(hasher: &mut Hasher, dispatch: &BodyDispatch) {
    write_str(hasher, dispatch.name);
    write_str(hasher, dispatch.discriminant);
    write_u32(hasher, dispatch.cases.len() as u32);
    for case in dispatch.cases {
        write_u64(hasher, case.value);
        match case.shape {
            BodyShape::Empty => write_u8(hasher, 0),
            BodyShape::Single(schema) => {
                write_u8(hasher, 1);
                write_struct(hasher, schema);
            }
            BodyShape::Repeated(schema) => {
                write_u8(hasher, 2);
                write_struct(hasher, schema);
            }
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_u64(hasher: &mut Hasher, value: u64) {
    hasher.update(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{EnumDef, Variant};
    use crate::field::FieldDef;
    use octets::Width;

    static KIND: EnumDef = EnumDef::new("Kind", &[Variant::new("A", 0)]);
    static KIND_MORE: EnumDef =
        EnumDef::new("Kind", &[Variant::new("A", 0), Variant::new("B", 1)]);

    static ORIGINAL: StructSchema =
        StructSchema::new("Hello", &[FieldDef::u16("a"), FieldDef::u32("b")]);
    static SAME: StructSchema =
        StructSchema::new("Hello", &[FieldDef::u16("a"), FieldDef::u32("b")]);
    static SWAPPED: StructSchema =
        StructSchema::new("Hello", &[FieldDef::u32("b"), FieldDef::u16("a")]);
    static WIDER: StructSchema =
        StructSchema::new("Hello", &[FieldDef::u32("a"), FieldDef::u32("b")]);
    static DEFAULTED: StructSchema =
        StructSchema::new("Hello", &[FieldDef::u16("a").default(1), FieldDef::u32("b")]);

    #[test]
    fn structurally_equal_schemas_hash_equal() {
        assert_eq!(schema_hash(&ORIGINAL), schema_hash(&SAME));
    }

    #[test]
    fn field_order_changes_hash() {
        assert_ne!(schema_hash(&ORIGINAL), schema_hash(&SWAPPED));
    }

    #[test]
    fn width_changes_hash() {
        assert_ne!(schema_hash(&ORIGINAL), schema_hash(&WIDER));
    }

    #[test]
    fn default_changes_hash() {
        assert_ne!(schema_hash(&ORIGINAL), schema_hash(&DEFAULTED));
    }

    #[test]
    fn alignment_changes_hash() {
        static PADDED: StructSchema =
            StructSchema::new("Hello", &[FieldDef::u16("a"), FieldDef::u32("b")]).padded_to(8);
        assert_ne!(schema_hash(&ORIGINAL), schema_hash(&PADDED));
    }

    #[test]
    fn enum_variants_do_not_change_hash() {
        static WITH_A: StructSchema =
            StructSchema::new("E", &[FieldDef::enumeration("kind", Width::U8, &KIND)]);
        static WITH_AB: StructSchema =
            StructSchema::new("E", &[FieldDef::enumeration("kind", Width::U8, &KIND_MORE)]);
        assert_eq!(schema_hash(&WITH_A), schema_hash(&WITH_AB));
    }
}
