//! Discriminated body resolution.

use octets::ByteReader;
use schema::{BodyDispatch, BodyShape, FieldDef, StructSchema};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::list::decode_remaining;
use crate::structs::{same_schema, StructValue};
use crate::value::Body;

/// Decodes `raw` as the body selected by `discriminant`.
///
/// Unregistered discriminants keep the bytes as [`Body::Opaque`]. A single
/// struct must fill the body exactly; an empty body must have no bytes.
pub fn resolve_body(
    dispatch: &'static BodyDispatch,
    discriminant: u64,
    raw: &[u8],
    limits: &CodecLimits,
) -> CodecResult<Body> {
    resolve_at(dispatch, discriminant, raw, limits, 0)
}

pub(crate) fn resolve_at(
    dispatch: &'static BodyDispatch,
    discriminant: u64,
    raw: &[u8],
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Body> {
    let Some(shape) = dispatch.shape_for(discriminant) else {
        debug!(
            dispatch = dispatch.name,
            discriminant,
            len = raw.len(),
            "unregistered discriminant, keeping body opaque"
        );
        return Ok(Body::Opaque(raw.to_vec()));
    };

    let mut reader = ByteReader::new(raw);
    match shape {
        BodyShape::Empty => {
            if raw.is_empty() {
                Ok(Body::Empty)
            } else {
                Err(CodecError::TrailingBytes {
                    schema: dispatch.name,
                    remaining: raw.len(),
                })
            }
        }
        BodyShape::Single(schema) => {
            let value = StructValue::unpack_at(schema, &mut reader, limits, depth + 1)?;
            if reader.is_empty() {
                Ok(Body::Single(value))
            } else {
                Err(CodecError::TrailingBytes {
                    schema: schema.name,
                    remaining: reader.remaining(),
                })
            }
        }
        BodyShape::Repeated(schema) => {
            decode_remaining(dispatch.name, dispatch.discriminant, schema, &mut reader, limits, depth)
                .map(Body::Elements)
        }
    }
}

/// Checks that a body matches the layout its discriminant selects.
pub(crate) fn check_body(
    owner: &'static StructSchema,
    field: &FieldDef,
    dispatch: &BodyDispatch,
    discriminant: Option<u64>,
    body: &Body,
) -> CodecResult<()> {
    let shape = discriminant.and_then(|value| dispatch.shape_for(value));
    let matches = match (shape, body) {
        (_, Body::Opaque(_))
        | (None | Some(BodyShape::Empty | BodyShape::Repeated(_)), Body::Empty) => true,
        (Some(BodyShape::Single(schema)), Body::Single(value)) => {
            same_schema(schema, value.schema())
        }
        (Some(BodyShape::Repeated(schema)), Body::Elements(items)) => {
            items.iter().all(|item| same_schema(schema, item.schema()))
        }
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(CodecError::TypeMismatch {
            schema: owner.name,
            field: field.name,
            expected: expected_for(shape),
            found: body.describe(),
        })
    }
}

const fn expected_for(shape: Option<BodyShape>) -> &'static str {
    match shape {
        Some(BodyShape::Empty) => "empty body",
        Some(BodyShape::Single(_)) => "single body",
        Some(BodyShape::Repeated(_)) => "repeated body",
        None => "opaque body",
    }
}
