//! Error types for schema compilation, decoding, and encoding.

use thiserror::Error;

use crate::model::WireKind;

/// Error while compiling a schema from declared field descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("message {name:?} declared more than once")]
    DuplicateMessage { name: String },

    #[error("message {message:?} declares field {field:?} more than once")]
    DuplicateField { message: String, field: String },

    #[error("message {message:?} reuses tag {tag} (field {field:?})")]
    DuplicateTag {
        message: String,
        field: String,
        tag: u32,
    },

    #[error("field {message}.{field} has tag {tag} outside [1, 2^29 - 1]")]
    TagOutOfRange {
        message: String,
        field: String,
        tag: u32,
    },

    #[error("field {message}.{field} has unknown type {declared:?}")]
    UnknownType {
        message: String,
        field: String,
        declared: String,
    },
}

/// Error during wire decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unknown message {name:?}")]
    UnknownMessage { name: String },

    #[error("message {message:?} has no field with tag {tag}")]
    UnknownField { message: String, tag: u32 },

    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("varint value does not fit the {context} domain")]
    VarintOverflow { context: &'static str },

    #[error("tag key carries invalid wire kind {value}")]
    InvalidWireKind { value: u8 },

    #[error("field {message}.{field} expects {expected:?} payload, wire says {found:?}")]
    WireKindMismatch {
        message: String,
        field: String,
        expected: WireKind,
        found: WireKind,
    },

    #[error("invalid UTF-8 in string field {field:?}")]
    InvalidUtf8 { field: String },

    #[error("message nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },
}

/// Error during wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unknown message {name:?}")]
    UnknownMessage { name: String },

    #[error("message {message:?} has no field named {field:?}")]
    UnknownField { message: String, field: String },

    #[error("field {field:?} expects a {expected} value, record holds {found}")]
    ValueTypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("record nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },
}
