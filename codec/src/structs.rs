//! Struct values bound to a schema.

use std::borrow::Cow;
use std::fmt;

use octets::{check_cstr, OctetError};
use schema::{BodyDispatch, BodyShape, FieldDef, FieldKind, ListExtent, StructSchema};

use crate::error::{CodecError, CodecResult};
use crate::value::{Body, Value};

/// A struct instance: one optional value per schema field.
///
/// Unassigned fields take their schema default: integers use the field's
/// `default`, byte fields are zero-filled, strings and variable lists are
/// empty, nested structs are default instances. Length fields and list
/// count/byte references are filled automatically on pack.
#[derive(Debug, Clone)]
pub struct StructValue {
    schema: &'static StructSchema,
    values: Vec<Option<Value>>,
}

impl StructValue {
    /// Creates an instance with every field unassigned.
    #[must_use]
    pub fn new(schema: &'static StructSchema) -> Self {
        Self {
            schema,
            values: vec![None; schema.fields.len()],
        }
    }

    pub(crate) fn from_parts(schema: &'static StructSchema, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(values.len(), schema.fields.len());
        Self { schema, values }
    }

    #[must_use]
    pub const fn schema(&self) -> &'static StructSchema {
        self.schema
    }

    /// Assigns a field, checking the value against the field kind.
    ///
    /// Plain integers assigned to enum or bitmask fields are bound to the
    /// field's table.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> CodecResult<()> {
        let idx = self.index(name)?;
        let field = &self.schema.fields[idx];
        self.values[idx] = Some(coerce(self.schema, field, value.into())?);
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> CodecResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Clears an assignment so the field reverts to its default.
    pub fn unset(&mut self, name: &str) -> CodecResult<()> {
        let idx = self.index(name)?;
        self.values[idx] = None;
        Ok(())
    }

    /// Returns `true` if the field was assigned or decoded.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.schema
            .index_of(name)
            .is_some_and(|idx| self.values[idx].is_some())
    }

    /// Effective value of a field.
    pub fn get(&self, name: &str) -> CodecResult<Value> {
        let idx = self.index(name)?;
        self.effective(idx)
            .map(Cow::into_owned)
            .ok_or_else(|| self.mismatch(idx, "value", "pad"))
    }

    /// Effective value of an integer, enum or bitmask field.
    pub fn uint(&self, name: &str) -> CodecResult<u64> {
        let idx = self.index(name)?;
        self.uint_at(idx)
            .ok_or_else(|| self.mismatch(idx, "uint", self.schema.fields[idx].kind.describe()))
    }

    /// Effective body of a body field.
    pub fn body(&self, name: &str) -> CodecResult<Body> {
        match self.get(name)? {
            Value::Body(body) => Ok(body),
            other => {
                let idx = self.index(name)?;
                Err(self.mismatch(idx, "body", other.describe()))
            }
        }
    }

    /// Encoded size in bytes, trailing alignment included.
    #[must_use]
    pub fn size(&self) -> usize {
        let content = self.content_size();
        content + self.schema.trailing_pad(content)
    }

    /// Size of the fields alone; this is what the length field carries.
    pub(crate) fn content_size(&self) -> usize {
        self.schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| self.field_size(idx, field))
            .sum()
    }

    /// Effective values of every value-carrying field, in order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Cow<'_, Value>)> + '_ {
        self.schema
            .fields
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| self.effective(idx).map(|value| (field.name, value)))
    }

    pub(crate) fn field_size(&self, idx: usize, field: &FieldDef) -> usize {
        if let Some(size) = field.kind.fixed_size() {
            return size;
        }
        match self.effective(idx).as_deref() {
            Some(Value::Blob(bytes) | Value::Bytes(bytes)) => bytes.len(),
            Some(Value::Struct(value)) => value.size(),
            Some(Value::List(items)) => items.iter().map(Self::size).sum(),
            Some(Value::Body(body)) => body.size(),
            _ => 0,
        }
    }

    pub(crate) fn effective(&self, idx: usize) -> Option<Cow<'_, Value>> {
        let field = &self.schema.fields[idx];
        if let Some(raw) = self.derived_uint(idx) {
            return Some(Cow::Owned(bind_uint(field.kind, raw)));
        }
        if let Some(value) = &self.values[idx] {
            return Some(Cow::Borrowed(value));
        }
        let value = match field.kind {
            FieldKind::UInt(_) => Value::UInt(field.default),
            FieldKind::Enum(_, def) => Value::Enum(def.bind(field.default)),
            FieldKind::Bitmask(_, def) => Value::Bitmask(def.bind(field.default)),
            FieldKind::Pad(_) => return None,
            FieldKind::Bytes(len) => Value::Bytes(vec![0; len]),
            FieldKind::Str(_) => Value::Str(Vec::new()),
            FieldKind::Blob => Value::Blob(Vec::new()),
            FieldKind::Struct(schema) => Value::Struct(Self::new(schema)),
            FieldKind::List(list) => Value::List(match list.extent {
                ListExtent::Fixed(count) => (0..count).map(|_| Self::new(list.element)).collect(),
                _ => Vec::new(),
            }),
            FieldKind::Body(dispatch) => Value::Body(self.default_body(dispatch)),
        };
        Some(Cow::Owned(value))
    }

    pub(crate) fn uint_at(&self, idx: usize) -> Option<u64> {
        if let Some(raw) = self.derived_uint(idx) {
            return Some(raw);
        }
        match &self.values[idx] {
            Some(value) => value.as_uint(),
            None => self.schema.fields[idx]
                .kind
                .is_integer()
                .then_some(self.schema.fields[idx].default),
        }
    }

    /// Value of an integer field that follows from other fields: the length
    /// field and list count/byte references. Assignments to these are ignored.
    fn derived_uint(&self, idx: usize) -> Option<u64> {
        let field = &self.schema.fields[idx];
        if !field.kind.is_integer() {
            return None;
        }
        if self.schema.length_field == Some(field.name) {
            return Some(self.content_size() as u64);
        }
        self.schema
            .fields
            .iter()
            .enumerate()
            .find_map(|(list_idx, other)| {
                let FieldKind::List(list) = other.kind else {
                    return None;
                };
                match list.extent {
                    ListExtent::CountFrom(name) if name == field.name => {
                        Some(self.assigned_items(list_idx).len() as u64)
                    }
                    ListExtent::BytesFrom(name) if name == field.name => Some(
                        self.assigned_items(list_idx)
                            .iter()
                            .map(Self::size)
                            .sum::<usize>() as u64,
                    ),
                    _ => None,
                }
            })
    }

    fn assigned_items(&self, idx: usize) -> &[Self] {
        match &self.values[idx] {
            Some(Value::List(items)) => items,
            _ => &[],
        }
    }

    /// Current value of the discriminant a dispatch refers to.
    pub(crate) fn discriminant(&self, dispatch: &BodyDispatch) -> Option<u64> {
        self.schema
            .index_of(dispatch.discriminant)
            .and_then(|idx| self.uint_at(idx))
    }

    fn default_body(&self, dispatch: &BodyDispatch) -> Body {
        let shape = self
            .discriminant(dispatch)
            .and_then(|value| dispatch.shape_for(value));
        match shape {
            Some(BodyShape::Empty) => Body::Empty,
            Some(BodyShape::Single(schema)) => Body::Single(Self::new(schema)),
            Some(BodyShape::Repeated(_)) => Body::Elements(Vec::new()),
            None => Body::Opaque(Vec::new()),
        }
    }

    fn index(&self, name: &str) -> CodecResult<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| CodecError::UnknownField {
                schema: self.schema.name,
                field: name.to_owned(),
            })
    }

    fn mismatch(&self, idx: usize, expected: &'static str, found: &'static str) -> CodecError {
        CodecError::TypeMismatch {
            schema: self.schema.name,
            field: self.schema.fields[idx].name,
            expected,
            found,
        }
    }
}

fn bind_uint(kind: FieldKind, raw: u64) -> Value {
    match kind {
        FieldKind::Enum(_, def) => Value::Enum(def.bind(raw)),
        FieldKind::Bitmask(_, def) => Value::Bitmask(def.bind(raw)),
        _ => Value::UInt(raw),
    }
}

pub(crate) fn same_schema(a: &StructSchema, b: &StructSchema) -> bool {
    std::ptr::eq(a, b) || a == b
}

fn coerce(schema: &'static StructSchema, field: &FieldDef, value: Value) -> CodecResult<Value> {
    let mismatch = |found: &'static str| CodecError::TypeMismatch {
        schema: schema.name,
        field: field.name,
        expected: field.kind.describe(),
        found,
    };

    match (field.kind, value) {
        (FieldKind::UInt(_), value @ (Value::UInt(_) | Value::Enum(_) | Value::Bitmask(_))) => {
            Ok(Value::UInt(value.as_uint().unwrap_or_default()))
        }
        (FieldKind::Enum(_, def), Value::UInt(raw)) => Ok(Value::Enum(def.bind(raw))),
        (FieldKind::Enum(_, def), Value::Enum(value)) if value.def().name == def.name => {
            Ok(Value::Enum(value))
        }
        (FieldKind::Bitmask(_, def), Value::UInt(raw)) => Ok(Value::Bitmask(def.bind(raw))),
        (FieldKind::Bitmask(_, def), Value::Bitmask(value)) if value.def().name == def.name => {
            Ok(Value::Bitmask(value))
        }
        (FieldKind::Bytes(len), Value::Bytes(mut bytes) | Value::Blob(mut bytes)) => {
            if bytes.len() > len {
                return Err(CodecError::Primitive {
                    schema: schema.name,
                    field: field.name,
                    source: OctetError::LengthExceeded {
                        len: bytes.len(),
                        max: len,
                    },
                });
            }
            bytes.resize(len, 0);
            Ok(Value::Bytes(bytes))
        }
        (FieldKind::Str(len), Value::Str(value)) => {
            check_cstr(&value).map_err(|source| CodecError::Primitive {
                schema: schema.name,
                field: field.name,
                source,
            })?;
            if value.len() > len {
                return Err(CodecError::Primitive {
                    schema: schema.name,
                    field: field.name,
                    source: OctetError::LengthExceeded {
                        len: value.len(),
                        max: len,
                    },
                });
            }
            Ok(Value::Str(value))
        }
        (FieldKind::Blob, Value::Blob(bytes) | Value::Bytes(bytes)) => Ok(Value::Blob(bytes)),
        (FieldKind::Struct(expected), Value::Struct(value)) => {
            if same_schema(expected, value.schema) {
                Ok(Value::Struct(value))
            } else {
                Err(mismatch(value.schema.name))
            }
        }
        (FieldKind::List(list), Value::List(items)) => {
            if let Some(item) = items
                .iter()
                .find(|item| !same_schema(list.element, item.schema))
            {
                return Err(mismatch(item.schema.name));
            }
            if let ListExtent::Fixed(expected) = list.extent {
                if items.len() != expected {
                    return Err(CodecError::CountMismatch {
                        schema: schema.name,
                        field: field.name,
                        expected,
                        actual: items.len(),
                    });
                }
            }
            Ok(Value::List(items))
        }
        (FieldKind::Body(_), Value::Body(body)) => Ok(Value::Body(body)),
        (_, value) => Err(mismatch(value.describe())),
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        same_schema(self.schema, other.schema)
            && (0..self.values.len()).all(|idx| self.effective(idx) == other.effective(idx))
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.schema.name)?;
        for (idx, (name, value)) in self.fields().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{sep}{name}: {value}")?;
        }
        f.write_str(" }")
    }
}
