//! Struct schemas and validation.

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, FieldKind, ListExtent};

/// An ordered list of fields describing one wire struct.
///
/// When `length_field` is set, that integer field carries the total encoded
/// size of the struct (including itself). It is written on pack and bounds
/// the struct on unpack.
///
/// When `align` is above one, every instance is followed by zero bytes up to
/// the next multiple of `align`. The length field does not count them.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructSchema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
    pub length_field: Option<&'static str>,
    pub align: usize,
}

impl StructSchema {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            name,
            fields,
            length_field: None,
            align: 1,
        }
    }

    /// A struct whose total size is carried by `length_field`.
    #[must_use]
    pub const fn sized_by(
        name: &'static str,
        length_field: &'static str,
        fields: &'static [FieldDef],
    ) -> Self {
        Self {
            name,
            fields,
            length_field: Some(length_field),
            align: 1,
        }
    }

    /// Pads every instance with zero bytes to a multiple of `align`.
    #[must_use]
    pub const fn padded_to(self, align: usize) -> Self {
        Self { align, ..self }
    }

    /// Zero bytes that follow `len` bytes of content.
    #[must_use]
    pub const fn trailing_pad(&self, len: usize) -> usize {
        if self.align <= 1 {
            return 0;
        }
        (self.align - len % self.align) % self.align
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Names of the value-carrying fields, skipping padding.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| !field.is_pad())
            .map(|field| field.name)
    }

    /// Encoded size, if every instance has the same size.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        if self.length_field.is_some() {
            return None;
        }
        self.fields
            .iter()
            .try_fold(0usize, |acc, field| field.kind.fixed_size().map(|size| acc + size))
            .map(|size| size + self.trailing_pad(size))
    }

    /// Smallest encoded size of any instance, without trailing padding.
    #[must_use]
    pub fn min_size(&self) -> usize {
        self.fields.iter().map(|field| field.kind.min_size()).sum()
    }

    /// Checks the structural invariants of this schema and every schema it
    /// references.
    pub fn validate(&self) -> SchemaResult<()> {
        let last = self.fields.len().saturating_sub(1);
        for (idx, field) in self.fields.iter().enumerate() {
            if !field.is_pad() && self.fields[..idx].iter().any(|prev| prev.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name,
                });
            }
            if field.kind.is_unbounded() && idx != last {
                return Err(SchemaError::UnboundedFieldNotLast {
                    schema: self.name,
                    field: field.name,
                });
            }
            if let Some(width) = field.kind.width() {
                if !width.fits(field.default) {
                    return Err(SchemaError::DefaultOutOfRange {
                        schema: self.name,
                        field: field.name,
                        default: field.default,
                        width,
                    });
                }
            }
            self.validate_kind(idx, field)?;
        }

        if self.align == 0 || !self.align.is_power_of_two() {
            return Err(SchemaError::InvalidAlignment {
                schema: self.name,
                align: self.align,
            });
        }

        if let Some(length_field) = self.length_field {
            let is_integer = self
                .field(length_field)
                .is_some_and(|field| field.kind.is_integer());
            if !is_integer {
                return Err(SchemaError::InvalidLengthField {
                    schema: self.name,
                    field: length_field,
                });
            }
        }
        Ok(())
    }

    fn validate_kind(&self, idx: usize, field: &FieldDef) -> SchemaResult<()> {
        match field.kind {
            FieldKind::Struct(schema) => schema.validate(),
            FieldKind::List(list) => {
                match list.extent {
                    ListExtent::CountFrom(reference) | ListExtent::BytesFrom(reference) => {
                        self.check_reference(idx, field, reference)?;
                    }
                    ListExtent::Remaining | ListExtent::Fixed(_) => {}
                }
                let variable = !matches!(list.extent, ListExtent::Fixed(_));
                if variable && list.element.min_size() == 0 {
                    return Err(SchemaError::ZeroSizedElement {
                        schema: self.name,
                        field: field.name,
                        element: list.element.name,
                    });
                }
                list.element.validate()
            }
            FieldKind::Body(dispatch) => {
                self.check_reference(idx, field, dispatch.discriminant)?;
                dispatch.validate()
            }
            _ => Ok(()),
        }
    }

    fn check_reference(
        &self,
        idx: usize,
        field: &FieldDef,
        reference: &'static str,
    ) -> SchemaResult<()> {
        let valid = self.fields[..idx]
            .iter()
            .any(|prev| prev.name == reference && prev.kind.is_integer());
        if valid {
            Ok(())
        } else {
            Err(SchemaError::InvalidReference {
                schema: self.name,
                field: field.name,
                reference,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{BodyCase, BodyDispatch};
    use octets::Width;

    static ACTION: StructSchema = StructSchema::sized_by(
        "Action",
        "len",
        &[FieldDef::u16("type"), FieldDef::u16("len"), FieldDef::blob("body")],
    );

    static POINT: StructSchema =
        StructSchema::new("Point", &[FieldDef::u16("x"), FieldDef::pad("pad", 2), FieldDef::u32("y")]);

    #[test]
    fn fixed_size_sums_fields() {
        assert_eq!(POINT.fixed_size(), Some(8));
        assert_eq!(POINT.min_size(), 8);
        POINT.validate().unwrap();
    }

    #[test]
    fn length_sized_struct_has_no_fixed_size() {
        assert_eq!(ACTION.fixed_size(), None);
        assert_eq!(ACTION.min_size(), 4);
        ACTION.validate().unwrap();
    }

    #[test]
    fn field_lookup() {
        assert_eq!(POINT.index_of("y"), Some(2));
        assert_eq!(POINT.field("x").map(|f| f.kind), Some(FieldKind::UInt(Width::U16)));
        assert!(POINT.field("z").is_none());
        assert_eq!(POINT.field_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn duplicate_field_rejected() {
        static DUP: StructSchema = StructSchema::new("Dup", &[FieldDef::u8("a"), FieldDef::u8("a")]);
        assert_eq!(
            DUP.validate().unwrap_err(),
            SchemaError::DuplicateField {
                schema: "Dup",
                field: "a"
            }
        );
    }

    #[test]
    fn repeated_pad_names_allowed() {
        static PADS: StructSchema = StructSchema::new(
            "Pads",
            &[FieldDef::pad("pad", 1), FieldDef::u8("a"), FieldDef::pad("pad", 2)],
        );
        PADS.validate().unwrap();
    }

    #[test]
    fn unbounded_field_must_be_last() {
        static BAD: StructSchema =
            StructSchema::new("Bad", &[FieldDef::blob("data"), FieldDef::u8("after")]);
        assert!(matches!(
            BAD.validate().unwrap_err(),
            SchemaError::UnboundedFieldNotLast { field: "data", .. }
        ));
    }

    #[test]
    fn list_reference_must_precede() {
        static BAD: StructSchema = StructSchema::new(
            "Bad",
            &[
                FieldDef::list("points", &POINT, ListExtent::CountFrom("n")),
                FieldDef::u8("n"),
            ],
        );
        assert!(matches!(
            BAD.validate().unwrap_err(),
            SchemaError::InvalidReference { reference: "n", .. }
        ));

        static GOOD: StructSchema = StructSchema::new(
            "Good",
            &[
                FieldDef::u8("n"),
                FieldDef::list("points", &POINT, ListExtent::CountFrom("n")),
            ],
        );
        GOOD.validate().unwrap();
    }

    #[test]
    fn body_discriminant_must_exist() {
        static DISPATCH: BodyDispatch =
            BodyDispatch::new("Body", "kind", &[BodyCase::single(1, &POINT)]);
        static BAD: StructSchema =
            StructSchema::new("Bad", &[FieldDef::u16("type"), FieldDef::body("body", &DISPATCH)]);
        assert!(matches!(
            BAD.validate().unwrap_err(),
            SchemaError::InvalidReference { reference: "kind", .. }
        ));
    }

    #[test]
    fn length_field_must_be_integer() {
        static BAD: StructSchema =
            StructSchema::sized_by("Bad", "len", &[FieldDef::bytes("len", 2)]);
        assert_eq!(
            BAD.validate().unwrap_err(),
            SchemaError::InvalidLengthField {
                schema: "Bad",
                field: "len"
            }
        );
    }

    #[test]
    fn padded_struct_sizes() {
        static ELEM: StructSchema = StructSchema::sized_by(
            "Elem",
            "length",
            &[FieldDef::u16("kind"), FieldDef::u16("length"), FieldDef::blob("body")],
        )
        .padded_to(8);
        static FIXED: StructSchema =
            StructSchema::new("Fixed", &[FieldDef::u16("a"), FieldDef::u8("b")]).padded_to(4);

        assert_eq!(ELEM.min_size(), 4);
        assert_eq!(ELEM.trailing_pad(4), 4);
        assert_eq!(ELEM.trailing_pad(8), 0);
        assert_eq!(ELEM.trailing_pad(12), 4);
        assert_eq!(FIXED.fixed_size(), Some(4));
        assert!(ELEM.validate().is_ok());
    }

    #[test]
    fn alignment_must_be_power_of_two() {
        static BAD: StructSchema = StructSchema::new("Bad", &[FieldDef::u8("a")]).padded_to(6);
        assert_eq!(
            BAD.validate().unwrap_err(),
            SchemaError::InvalidAlignment {
                schema: "Bad",
                align: 6
            }
        );
    }

    #[test]
    fn default_must_fit_width() {
        static BAD: StructSchema =
            StructSchema::new("Bad", &[FieldDef::u8("version").default(0x100)]);
        assert!(matches!(
            BAD.validate().unwrap_err(),
            SchemaError::DefaultOutOfRange { default: 0x100, .. }
        ));
    }

    #[test]
    fn variable_list_of_empty_elements_rejected() {
        static EMPTY: StructSchema = StructSchema::new("Empty", &[]);
        static BAD: StructSchema =
            StructSchema::new("Bad", &[FieldDef::list("items", &EMPTY, ListExtent::Remaining)]);
        assert!(matches!(
            BAD.validate().unwrap_err(),
            SchemaError::ZeroSizedElement { element: "Empty", .. }
        ));
    }
}
