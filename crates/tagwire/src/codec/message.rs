//! Message-level decoding and encoding.
//!
//! The decoder walks `(tag key, payload)` pairs and dispatches through
//! the schema; the encoder is two-pass: a sizing walk computes the exact
//! output length, then a single allocation is filled by the write walk.

use std::slice;

use crate::codec::primitives::{Reader, Writer, varint_len};
use crate::codec::scalar::{decode_scalar, encode_scalar, scalar_len};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{Cardinality, FieldDescriptor, Record, Schema, Value, WireKind};

/// What the decoder does with a tag that has no descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Fail with [`DecodeError::UnknownField`]. Matches the strict
    /// historical behavior of this codec.
    #[default]
    Reject,
    /// Consume the payload per the key's wire kind and drop it, the
    /// conventional forward-compatible policy for this wire format.
    Skip,
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes `data` as message `name`, with default options.
pub fn decode_message(schema: &Schema, name: &str, data: &[u8]) -> Result<Record, DecodeError> {
    decode_message_with_options(schema, name, data, DecodeOptions::default())
}

/// Decodes `data` as message `name`.
///
/// Succeeds only when the buffer is consumed exactly; the first failure
/// propagates with no partial record.
pub fn decode_message_with_options(
    schema: &Schema,
    name: &str,
    data: &[u8],
    options: DecodeOptions,
) -> Result<Record, DecodeError> {
    decode_embedded(schema, name, data, 0, options)
}

/// Recursive decode entry; `data` is exactly one message's bytes.
pub(crate) fn decode_embedded(
    schema: &Schema,
    name: &str,
    data: &[u8],
    depth: usize,
    options: DecodeOptions,
) -> Result<Record, DecodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    let desc = schema.message(name).ok_or_else(|| DecodeError::UnknownMessage {
        name: name.to_string(),
    })?;

    let mut reader = Reader::new(data);
    let mut record = Record::new();

    while !reader.is_empty() {
        let key = reader.read_varint32("tag key")?;
        let kind_bits = (key & 0x07) as u8;
        let wire = WireKind::from_u8(kind_bits)
            .ok_or(DecodeError::InvalidWireKind { value: kind_bits })?;
        let tag = key >> 3;

        let Some(field) = desc.field_by_tag(tag) else {
            match options.unknown_fields {
                UnknownFieldPolicy::Reject => {
                    return Err(DecodeError::UnknownField {
                        message: desc.name().to_string(),
                        tag,
                    });
                }
                UnknownFieldPolicy::Skip => {
                    skip_payload(&mut reader, wire)?;
                    continue;
                }
            }
        };

        let expected = field.field_type.wire_kind();
        if wire != expected {
            return Err(DecodeError::WireKindMismatch {
                message: desc.name().to_string(),
                field: field.name.clone(),
                expected,
                found: wire,
            });
        }

        let value = decode_scalar(&mut reader, schema, field, depth, options)?;
        if field.cardinality == Cardinality::Repeated {
            record.push_repeated(&field.name, value);
        } else {
            // Last occurrence wins, per wire-format convention.
            record.set(field.name.clone(), value);
        }
    }

    Ok(record)
}

/// Consumes one payload of the given wire kind without interpreting it.
fn skip_payload(reader: &mut Reader<'_>, wire: WireKind) -> Result<(), DecodeError> {
    match wire {
        WireKind::Varint => {
            reader.read_varint64("skipped varint")?;
        }
        WireKind::Fixed64 => {
            reader.read_bytes(8, "skipped fixed64")?;
        }
        WireKind::LengthDelimited => {
            let len = reader.read_varint64("skipped length")? as usize;
            reader.read_bytes(len, "skipped payload")?;
        }
        WireKind::Fixed32 => {
            reader.read_bytes(4, "skipped fixed32")?;
        }
    }
    Ok(())
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes `record` as message `name` into a freshly allocated buffer.
///
/// Two-pass: the exact output size is computed first, then a single
/// allocation is written front to back.
pub fn encode_message(schema: &Schema, name: &str, record: &Record) -> Result<Vec<u8>, EncodeError> {
    let total = message_len(schema, name, record, 0)?;
    let mut writer = Writer::with_capacity(total);
    encode_embedded(&mut writer, schema, name, record, 0)?;
    debug_assert_eq!(writer.len(), total);
    Ok(writer.into_bytes())
}

/// Exact number of bytes [`encode_message`] would produce.
pub fn encoded_len(schema: &Schema, name: &str, record: &Record) -> Result<usize, EncodeError> {
    message_len(schema, name, record, 0)
}

/// Sizing walk over the record's fields.
pub(crate) fn message_len(
    schema: &Schema,
    name: &str,
    record: &Record,
    depth: usize,
) -> Result<usize, EncodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(EncodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    let desc = schema.message(name).ok_or_else(|| EncodeError::UnknownMessage {
        name: name.to_string(),
    })?;

    let mut total = 0;
    for (field_name, value) in record.iter() {
        let field = desc
            .field_by_name(field_name)
            .ok_or_else(|| EncodeError::UnknownField {
                message: name.to_string(),
                field: field_name.to_string(),
            })?;
        let key_len = varint_len(field.key() as u64);
        for element in field_elements(field, value)? {
            total += key_len + scalar_len(schema, field, element, depth)?;
        }
    }
    Ok(total)
}

/// Write walk; emits each field as `(tag key, payload)` occurrences.
pub(crate) fn encode_embedded(
    writer: &mut Writer,
    schema: &Schema,
    name: &str,
    record: &Record,
    depth: usize,
) -> Result<(), EncodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(EncodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    let desc = schema.message(name).ok_or_else(|| EncodeError::UnknownMessage {
        name: name.to_string(),
    })?;

    for (field_name, value) in record.iter() {
        let field = desc
            .field_by_name(field_name)
            .ok_or_else(|| EncodeError::UnknownField {
                message: name.to_string(),
                field: field_name.to_string(),
            })?;
        for element in field_elements(field, value)? {
            writer.write_varint32(field.key());
            encode_scalar(writer, schema, field, element, depth)?;
        }
    }
    Ok(())
}

/// The elements a field value contributes, each emitted as one
/// tag+payload occurrence.
///
/// A repeated field accepts a bare value as a one-element sequence; a
/// non-repeated field rejects a sequence.
fn field_elements<'r>(
    field: &FieldDescriptor,
    value: &'r Value,
) -> Result<&'r [Value], EncodeError> {
    match (field.cardinality, value) {
        (Cardinality::Repeated, Value::Repeated(items)) => Ok(items),
        (Cardinality::Repeated, single) => Ok(slice::from_ref(single)),
        (_, Value::Repeated(_)) => Err(EncodeError::ValueTypeMismatch {
            field: field.name.clone(),
            expected: field.field_type.name(),
            found: "repeated",
        }),
        (_, single) => Ok(slice::from_ref(single)),
    }
}
