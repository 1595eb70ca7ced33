//! Struct packing.

use octets::ByteWriter;
use schema::{FieldKind, ListExtent};

use crate::body::check_body;
use crate::error::{CodecError, CodecResult};
use crate::structs::StructValue;
use crate::value::{Body, Value};

impl StructValue {
    /// Packs the struct into a new buffer.
    pub fn pack(&self) -> CodecResult<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(self.size());
        self.pack_into(&mut writer)?;
        Ok(writer.finish())
    }

    /// Packs every field in declared order.
    ///
    /// The length field, if any, is written with the struct's size; list
    /// count and byte references are written from the list they describe.
    /// Trailing alignment is written as zero bytes after the last field.
    pub fn pack_into(&self, writer: &mut ByteWriter) -> CodecResult<()> {
        let schema = self.schema();

        for (idx, field) in schema.fields.iter().enumerate() {
            let primitive = CodecError::primitive(schema.name, field.name);

            if let Some(width) = field.kind.width() {
                let value = self.uint_at(idx).unwrap_or(field.default);
                writer.write_uint(value, width).map_err(&primitive)?;
                continue;
            }

            if let FieldKind::Pad(len) = field.kind {
                writer.write_pad(len);
                continue;
            }

            let Some(value) = self.effective(idx) else {
                continue;
            };
            match (field.kind, &*value) {
                (FieldKind::Bytes(len), Value::Bytes(bytes)) => {
                    writer.write_fixed(bytes, len).map_err(&primitive)?;
                }
                (FieldKind::Str(len), Value::Str(text)) => {
                    writer.write_cstr(text, len).map_err(&primitive)?;
                }
                (FieldKind::Blob, Value::Blob(bytes)) => writer.write_bytes(bytes),
                (FieldKind::Struct(_), Value::Struct(nested)) => nested.pack_into(writer)?,
                (FieldKind::List(list), Value::List(items)) => {
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
                    for item in items {
                        item.pack_into(writer)?;
                    }
                }
                (FieldKind::Body(dispatch), Value::Body(body)) => {
                    check_body(schema, field, dispatch, self.discriminant(dispatch), body)?;
                    body.pack_into(writer)?;
                }
                (kind, value) => {
                    return Err(CodecError::TypeMismatch {
                        schema: schema.name,
                        field: field.name,
                        expected: kind.describe(),
                        found: value.describe(),
                    });
                }
            }
        }
        writer.write_pad(schema.trailing_pad(self.content_size()));
        Ok(())
    }
}

impl Body {
    /// Packs the body bytes.
    pub fn pack_into(&self, writer: &mut ByteWriter) -> CodecResult<()> {
        match self {
            Self::Empty => {}
            Self::Single(value) => value.pack_into(writer)?,
            Self::Elements(items) => {
                for item in items {
                    item.pack_into(writer)?;
                }
            }
            Self::Opaque(bytes) => writer.write_bytes(bytes),
        }
        Ok(())
    }
}
