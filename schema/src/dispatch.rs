//! Discriminated body layouts.
//!
//! A [`BodyDispatch`] picks the layout of a trailing body from the value of
//! an earlier integer field, the discriminant. Message-level polymorphism
//! (header type selects the message) and body-level polymorphism (a stats
//! type selects the reply body) share this one mechanism.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::StructSchema;

/// What a body holds for a given discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BodyShape {
    /// No bytes.
    Empty,
    /// Exactly one struct.
    Single(&'static StructSchema),
    /// Zero or more structs filling the body.
    Repeated(&'static StructSchema),
}

impl BodyShape {
    /// Element schema, if the body carries structs.
    #[must_use]
    pub const fn element(&self) -> Option<&'static StructSchema> {
        match self {
            Self::Empty => None,
            Self::Single(schema) | Self::Repeated(schema) => Some(schema),
        }
    }
}

/// One entry of a dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BodyCase {
    pub value: u64,
    pub shape: BodyShape,
}

impl BodyCase {
    #[must_use]
    pub const fn empty(value: u64) -> Self {
        Self {
            value,
            shape: BodyShape::Empty,
        }
    }

    #[must_use]
    pub const fn single(value: u64, schema: &'static StructSchema) -> Self {
        Self {
            value,
            shape: BodyShape::Single(schema),
        }
    }

    #[must_use]
    pub const fn repeated(value: u64, schema: &'static StructSchema) -> Self {
        Self {
            value,
            shape: BodyShape::Repeated(schema),
        }
    }
}

/// Maps discriminant values to body layouts.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BodyDispatch {
    pub name: &'static str,
    /// Name of the sibling field holding the discriminant.
    pub discriminant: &'static str,
    pub cases: &'static [BodyCase],
}

impl BodyDispatch {
    #[must_use]
    pub const fn new(
        name: &'static str,
        discriminant: &'static str,
        cases: &'static [BodyCase],
    ) -> Self {
        Self {
            name,
            discriminant,
            cases,
        }
    }

    /// Layout for `value`, or `None` if the discriminant is not listed.
    #[must_use]
    pub fn shape_for(&self, value: u64) -> Option<BodyShape> {
        self.cases
            .iter()
            .find(|case| case.value == value)
            .map(|case| case.shape)
    }

    /// Checks the table for duplicate discriminants and validates every case.
    pub fn validate(&self) -> SchemaResult<()> {
        for (idx, case) in self.cases.iter().enumerate() {
            if self.cases[..idx].iter().any(|prev| prev.value == case.value) {
                return Err(SchemaError::DuplicateCase {
                    dispatch: self.name,
                    value: case.value,
                });
            }
            match case.shape {
                BodyShape::Empty => {}
                BodyShape::Single(schema) => schema.validate()?,
                BodyShape::Repeated(schema) => {
                    schema.validate()?;
                    if schema.min_size() == 0 {
                        return Err(SchemaError::ZeroSizedElement {
                            schema: self.name,
                            field: self.discriminant,
                            element: schema.name,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
