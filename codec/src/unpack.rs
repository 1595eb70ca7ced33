//! Struct unpacking.

use octets::ByteReader;
use schema::{FieldDef, FieldKind, ListExtent, StructSchema};
use tracing::{debug, trace};

use crate::body::resolve_at;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::list::{decode_count, decode_remaining};
use crate::structs::StructValue;
use crate::value::Value;

impl StructValue {
    /// Unpacks one struct from the reader.
    ///
    /// Fields are decoded in order. Unbounded fields (blob, remaining-list,
    /// body) consume the rest of the reader, or the rest of the struct when
    /// it carries a length field. Trailing alignment bytes are skipped.
    pub fn unpack(
        schema: &'static StructSchema,
        reader: &mut ByteReader<'_>,
        limits: &CodecLimits,
    ) -> CodecResult<Self> {
        Self::unpack_at(schema, reader, limits, 0)
    }

    /// Unpacks a struct that must fill `bytes` exactly.
    pub fn decode(schema: &'static StructSchema, bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let value = Self::unpack(schema, &mut reader, &CodecLimits::default())?;
        if reader.is_empty() {
            Ok(value)
        } else {
            Err(CodecError::TrailingBytes {
                schema: schema.name,
                remaining: reader.remaining(),
            })
        }
    }

    pub(crate) fn unpack_at(
        schema: &'static StructSchema,
        reader: &mut ByteReader<'_>,
        limits: &CodecLimits,
        depth: usize,
    ) -> CodecResult<Self> {
        if depth > limits.max_depth {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: limits.max_depth,
                actual: depth,
            });
        }

        let start = reader.position();
        let mut values: Vec<Option<Value>> = Vec::with_capacity(schema.fields.len());
        let mut bounded: Option<ByteReader<'_>> = None;

        for field in schema.fields {
            let value = {
                let cursor = match bounded.as_mut() {
                    Some(inner) => inner,
                    None => &mut *reader,
                };
                decode_field(schema, field, &values, cursor, limits, depth)?
            };

            if schema.length_field == Some(field.name) {
                let declared = value.as_ref().and_then(Value::as_uint).unwrap_or_default();
                let declared = usize::try_from(declared).unwrap_or(usize::MAX);
                let min = schema.min_size();
                let consumed = reader.position() - start;
                let remaining = declared
                    .checked_sub(consumed)
                    .filter(|_| declared >= min)
                    .ok_or(CodecError::InvalidLength {
                        schema: schema.name,
                        declared,
                        min,
                    })?;
                let rest = reader
                    .split_to(remaining)
                    .map_err(CodecError::primitive(schema.name, field.name))?;
                bounded = Some(rest);
            }
            values.push(value);
        }

        if let Some(rest) = bounded.filter(|rest| !rest.is_empty()) {
            debug!(
                schema = schema.name,
                skipped = rest.remaining(),
                "skipping bytes inside declared length"
            );
        }

        let pad = schema.trailing_pad(reader.position() - start);
        if pad > 0 {
            reader
                .skip(pad)
                .map_err(CodecError::primitive(schema.name, "padding"))?;
        }

        Ok(Self::from_parts(schema, values))
    }
}

fn decode_field(
    schema: &'static StructSchema,
    field: &FieldDef,
    decoded: &[Option<Value>],
    reader: &mut ByteReader<'_>,
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Option<Value>> {
    let primitive = CodecError::primitive(schema.name, field.name);

    let value = match field.kind {
        FieldKind::UInt(width) => Value::UInt(reader.read_uint(width).map_err(primitive)?),
        FieldKind::Enum(width, def) => {
            let value = def.bind(reader.read_uint(width).map_err(primitive)?);
            if !value.is_known() {
                trace!(
                    schema = schema.name,
                    field = field.name,
                    table = def.name,
                    raw = value.raw(),
                    "unrecognized enum value"
                );
            }
            Value::Enum(value)
        }
        FieldKind::Bitmask(width, def) => {
            let value = def.bind(reader.read_uint(width).map_err(primitive)?);
            if !value.is_known() {
                trace!(
                    schema = schema.name,
                    field = field.name,
                    table = def.name,
                    unknown_bits = value.unknown_bits(),
                    "unrecognized bitmask bits"
                );
            }
            Value::Bitmask(value)
        }
        FieldKind::Pad(len) => {
            reader.skip(len).map_err(primitive)?;
            return Ok(None);
        }
        FieldKind::Bytes(len) => Value::Bytes(reader.read_bytes(len).map_err(primitive)?.to_vec()),
        FieldKind::Str(len) => Value::Str(reader.read_cstr(len).map_err(primitive)?.to_vec()),
        FieldKind::Blob => Value::Blob(reader.read_rest().to_vec()),
        FieldKind::Struct(nested) => {
            Value::Struct(StructValue::unpack_at(nested, reader, limits, depth + 1)?)
        }
        FieldKind::List(list) => {
            let items = match list.extent {
                ListExtent::Fixed(count) => {
                    decode_count(list.element, count, reader, limits, depth)?
                }
                ListExtent::CountFrom(reference) => {
                    let count = sibling(schema, decoded, reference);
                    let count = usize::try_from(count).unwrap_or(usize::MAX);
                    decode_count(list.element, count, reader, limits, depth)?
                }
                ListExtent::BytesFrom(reference) => {
                    let len = sibling(schema, decoded, reference);
                    let len = usize::try_from(len).unwrap_or(usize::MAX);
                    let mut sub = reader.split_to(len).map_err(primitive)?;
                    decode_remaining(schema.name, field.name, list.element, &mut sub, limits, depth)?
                }
                ListExtent::Remaining => {
                    decode_remaining(schema.name, field.name, list.element, reader, limits, depth)?
                }
            };
            Value::List(items)
        }
        FieldKind::Body(dispatch) => {
            let discriminant = sibling(schema, decoded, dispatch.discriminant);
            let raw = reader.read_rest();
            Value::Body(resolve_at(dispatch, discriminant, raw, limits, depth)?)
        }
    };
    Ok(Some(value))
}

/// Raw value of an already decoded integer field.
fn sibling(schema: &StructSchema, decoded: &[Option<Value>], name: &str) -> u64 {
    schema
        .index_of(name)
        .and_then(|idx| decoded.get(idx))
        .and_then(|value| value.as_ref().and_then(Value::as_uint))
        .unwrap_or_default()
}
