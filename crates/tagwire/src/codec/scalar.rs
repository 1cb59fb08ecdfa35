//! Scalar conversions between record values and wire payloads.
//!
//! One exhaustive match per direction over [`FieldType`] — the
//! compile-time guarantee that every declared type has a decode, an
//! encode, and a size routine. Embedded messages delegate back to
//! [`codec::message`](crate::codec::message) for the recursion.

use crate::codec::message::{self, DecodeOptions};
use crate::codec::primitives::{
    Reader, Writer, varint_len, zigzag_decode32, zigzag_decode64, zigzag_encode32, zigzag_encode64,
};
use crate::error::{DecodeError, EncodeError};
use crate::model::{FieldDescriptor, FieldType, Schema, Value};

/// Decodes one payload for `field`, leaving the reader just past it.
pub(crate) fn decode_scalar(
    reader: &mut Reader<'_>,
    schema: &Schema,
    field: &FieldDescriptor,
    depth: usize,
    options: DecodeOptions,
) -> Result<Value, DecodeError> {
    match &field.field_type {
        FieldType::Int32 => {
            let raw = reader.read_varint32("int32")?;
            Ok(Value::Int32(raw as i32))
        }
        FieldType::Uint32 => Ok(Value::Uint32(reader.read_varint32("uint32")?)),
        FieldType::Sint32 => {
            let raw = reader.read_varint32("sint32")?;
            Ok(Value::Int32(zigzag_decode32(raw)))
        }
        FieldType::Int64 => {
            let raw = reader.read_varint64("int64")?;
            Ok(Value::Int64(raw as i64))
        }
        FieldType::Uint64 => Ok(Value::Uint64(reader.read_varint64("uint64")?)),
        FieldType::Sint64 => {
            let raw = reader.read_varint64("sint64")?;
            Ok(Value::Int64(zigzag_decode64(raw)))
        }
        FieldType::Bool => {
            let raw = reader.read_varint64("bool")?;
            Ok(Value::Bool(raw != 0))
        }
        FieldType::Enum(_) => {
            let raw = reader.read_varint32("enum")?;
            Ok(Value::Int32(raw as i32))
        }
        FieldType::Fixed32 => Ok(Value::Uint32(reader.read_fixed32("fixed32")?)),
        FieldType::Sfixed32 => {
            let raw = reader.read_fixed32("sfixed32")?;
            Ok(Value::Int32(raw as i32))
        }
        FieldType::Float => {
            let raw = reader.read_fixed32("float")?;
            Ok(Value::Float(f32::from_bits(raw)))
        }
        FieldType::Fixed64 => Ok(Value::Uint64(reader.read_fixed64("fixed64")?)),
        FieldType::Sfixed64 => {
            let raw = reader.read_fixed64("sfixed64")?;
            Ok(Value::Int64(raw as i64))
        }
        FieldType::Double => {
            let raw = reader.read_fixed64("double")?;
            Ok(Value::Double(f64::from_bits(raw)))
        }
        FieldType::Bytes => {
            let len = reader.read_varint64("bytes length")? as usize;
            let bytes = reader.read_bytes(len, "bytes")?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        FieldType::String => {
            let len = reader.read_varint64("string length")? as usize;
            let bytes = reader.read_bytes(len, "string")?;
            let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
                field: field.name.clone(),
            })?;
            Ok(Value::Str(text.to_string()))
        }
        FieldType::Message(name) => {
            let len = reader.read_varint64("message length")? as usize;
            let bytes = reader.read_bytes(len, "embedded message")?;
            let nested = message::decode_embedded(schema, name, bytes, depth + 1, options)?;
            Ok(Value::Message(nested))
        }
    }
}

/// Encodes one payload for `field` into the writer.
pub(crate) fn encode_scalar(
    writer: &mut Writer,
    schema: &Schema,
    field: &FieldDescriptor,
    value: &Value,
    depth: usize,
) -> Result<(), EncodeError> {
    match (&field.field_type, value) {
        (FieldType::Int32, Value::Int32(v)) => writer.write_varint32(*v as u32),
        (FieldType::Uint32, Value::Uint32(v)) => writer.write_varint32(*v),
        (FieldType::Sint32, Value::Int32(v)) => writer.write_varint32(zigzag_encode32(*v)),
        (FieldType::Int64, Value::Int64(v)) => writer.write_varint64(*v as u64),
        (FieldType::Uint64, Value::Uint64(v)) => writer.write_varint64(*v),
        (FieldType::Sint64, Value::Int64(v)) => writer.write_varint64(zigzag_encode64(*v)),
        (FieldType::Bool, Value::Bool(v)) => writer.write_varint32(*v as u32),
        (FieldType::Enum(_), Value::Int32(v)) => writer.write_varint32(*v as u32),
        (FieldType::Fixed32, Value::Uint32(v)) => writer.write_fixed32(*v),
        (FieldType::Sfixed32, Value::Int32(v)) => writer.write_fixed32(*v as u32),
        (FieldType::Float, Value::Float(v)) => writer.write_fixed32(v.to_bits()),
        (FieldType::Fixed64, Value::Uint64(v)) => writer.write_fixed64(*v),
        (FieldType::Sfixed64, Value::Int64(v)) => writer.write_fixed64(*v as u64),
        (FieldType::Double, Value::Double(v)) => writer.write_fixed64(v.to_bits()),
        (FieldType::Bytes, Value::Bytes(b)) => {
            writer.write_varint64(b.len() as u64);
            writer.write_bytes(b);
        }
        (FieldType::String, Value::Str(s)) => {
            writer.write_varint64(s.len() as u64);
            writer.write_bytes(s.as_bytes());
        }
        (FieldType::Message(name), Value::Message(record)) => {
            let nested_len = message::message_len(schema, name, record, depth + 1)?;
            writer.write_varint64(nested_len as u64);
            message::encode_embedded(writer, schema, name, record, depth + 1)?;
        }
        (_, value) => return Err(mismatch(field, value)),
    }
    Ok(())
}

/// Exact payload byte count `encode_scalar` will emit for `value`.
pub(crate) fn scalar_len(
    schema: &Schema,
    field: &FieldDescriptor,
    value: &Value,
    depth: usize,
) -> Result<usize, EncodeError> {
    let len = match (&field.field_type, value) {
        (FieldType::Int32, Value::Int32(v)) => varint_len(*v as u32 as u64),
        (FieldType::Uint32, Value::Uint32(v)) => varint_len(*v as u64),
        (FieldType::Sint32, Value::Int32(v)) => varint_len(zigzag_encode32(*v) as u64),
        (FieldType::Int64, Value::Int64(v)) => varint_len(*v as u64),
        (FieldType::Uint64, Value::Uint64(v)) => varint_len(*v),
        (FieldType::Sint64, Value::Int64(v)) => varint_len(zigzag_encode64(*v)),
        (FieldType::Bool, Value::Bool(_)) => 1,
        (FieldType::Enum(_), Value::Int32(v)) => varint_len(*v as u32 as u64),
        (FieldType::Fixed32, Value::Uint32(_)) => 4,
        (FieldType::Sfixed32, Value::Int32(_)) => 4,
        (FieldType::Float, Value::Float(_)) => 4,
        (FieldType::Fixed64, Value::Uint64(_)) => 8,
        (FieldType::Sfixed64, Value::Int64(_)) => 8,
        (FieldType::Double, Value::Double(_)) => 8,
        (FieldType::Bytes, Value::Bytes(b)) => varint_len(b.len() as u64) + b.len(),
        (FieldType::String, Value::Str(s)) => varint_len(s.len() as u64) + s.len(),
        (FieldType::Message(name), Value::Message(record)) => {
            let nested_len = message::message_len(schema, name, record, depth + 1)?;
            varint_len(nested_len as u64) + nested_len
        }
        (_, value) => return Err(mismatch(field, value)),
    };
    Ok(len)
}

fn mismatch(field: &FieldDescriptor, value: &Value) -> EncodeError {
    EncodeError::ValueTypeMismatch {
        field: field.name.clone(),
        expected: field.field_type.name(),
        found: value.kind(),
    }
}
