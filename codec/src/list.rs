//! List decoding.

use octets::{ByteReader, OctetError};
use schema::StructSchema;

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::structs::StructValue;

/// Decodes exactly `count` elements.
pub(crate) fn decode_count(
    element: &'static StructSchema,
    count: usize,
    reader: &mut ByteReader<'_>,
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Vec<StructValue>> {
    check_count(limits, count)?;
    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(StructValue::unpack_at(element, reader, limits, depth + 1)?);
    }
    Ok(items)
}

/// Decodes elements until the reader is exhausted.
///
/// Trailing bytes too short to hold one more element are a truncation.
pub(crate) fn decode_remaining(
    owner: &'static str,
    field: &'static str,
    element: &'static StructSchema,
    reader: &mut ByteReader<'_>,
    limits: &CodecLimits,
    depth: usize,
) -> CodecResult<Vec<StructValue>> {
    let min = element.min_size();
    let mut items = Vec::new();

    while !reader.is_empty() {
        let available = reader.remaining();
        if available < min || min == 0 {
            return Err(CodecError::Primitive {
                schema: owner,
                field,
                source: OctetError::Truncated {
                    requested: min.max(1),
                    available,
                },
            });
        }
        check_count(limits, items.len() + 1)?;
        items.push(StructValue::unpack_at(element, reader, limits, depth + 1)?);
    }
    Ok(items)
}

fn check_count(limits: &CodecLimits, count: usize) -> CodecResult<()> {
    if count > limits.max_list_elements {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::ListElements,
            limit: limits.max_list_elements,
            actual: count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::FieldDef;

    static PAIR: StructSchema =
        StructSchema::new("Pair", &[FieldDef::u16("a"), FieldDef::u16("b")]);

    #[test]
    fn remaining_consumes_everything() {
        let bytes = [0, 1, 0, 2, 0, 3, 0, 4];
        let mut reader = ByteReader::new(&bytes);
        let items =
            decode_remaining("Owner", "pairs", &PAIR, &mut reader, &CodecLimits::default(), 0)
                .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].uint("b").unwrap(), 4);
        assert!(reader.is_empty());
    }

    #[test]
    fn remaining_rejects_short_tail() {
        let bytes = [0, 1, 0, 2, 0, 3];
        let mut reader = ByteReader::new(&bytes);
        let err =
            decode_remaining("Owner", "pairs", &PAIR, &mut reader, &CodecLimits::default(), 0)
                .unwrap_err();
        assert_eq!(
            err,
            CodecError::Primitive {
                schema: "Owner",
                field: "pairs",
                source: OctetError::Truncated {
                    requested: 4,
                    available: 2
                },
            }
        );
    }

    #[test]
    fn count_reads_exactly_n() {
        let bytes = [0, 1, 0, 2, 0, 3, 0, 4, 0xff];
        let mut reader = ByteReader::new(&bytes);
        let items = decode_count(&PAIR, 2, &mut reader, &CodecLimits::default(), 0).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn element_limit_enforced() {
        let bytes = [0u8; 4 * 5];
        let limits = CodecLimits {
            max_list_elements: 4,
            ..CodecLimits::default()
        };
        let mut reader = ByteReader::new(&bytes);
        let err = decode_remaining("Owner", "pairs", &PAIR, &mut reader, &limits, 0).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::ListElements,
                limit: 4,
                actual: 5
            }
        ));

        let mut reader = ByteReader::new(&bytes);
        assert!(decode_count(&PAIR, 1000, &mut reader, &limits, 0).is_err());
    }
}
