//! tagwire: schema-driven tag-length-value wire codec.
//!
//! This crate converts between an in-memory record representation and
//! the compact protocol-buffer wire format, driven by a compiled schema.
//! It is the codec core only: the textual IDL parser and any file or
//! stream glue live outside and talk to this crate through
//! [`SchemaBuilder`] and raw byte slices.
//!
//! # Quick Start
//!
//! ```rust
//! use tagwire::{Cardinality, Record, SchemaBuilder, decode_message, encode_message};
//!
//! let schema = SchemaBuilder::new()
//!     .message("Test1", |m| m.field("a", "int32", Cardinality::Optional, 1))
//!     .build()
//!     .unwrap();
//!
//! let record = Record::new().with("a", 150i32);
//! let bytes = encode_message(&schema, "Test1", &record).unwrap();
//! assert_eq!(bytes, [0x08, 0x96, 0x01]);
//!
//! let decoded = decode_message(&schema, "Test1", &bytes).unwrap();
//! assert_eq!(decoded, record);
//! ```
//!
//! # Modules
//!
//! - [`model`]: schema descriptors, records, and the schema builder
//! - [`codec`]: varint primitives and the message decoder/encoder
//! - [`error`]: error types
//! - [`limits`]: security limits for decoding
//!
//! # Wire Format
//!
//! A message is a sequence of `(tag key, payload)` pairs with no
//! separators and no top-level framing; the key varint packs
//! `(tag << 3) | wire_kind`. Callers that need message framing on a
//! stream add their own length prefix outside this crate.
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - every read is bounds-checked and truncation is an explicit error
//! - varints are length- and range-limited
//! - message nesting depth is capped, so hostile payloads cannot
//!   exhaust the call stack
//!
//! # Concurrency
//!
//! Decode and encode are synchronous and share no state beyond the
//! schema, which is immutable once built. Calls may run concurrently
//! from any number of threads against the same schema.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, UnknownFieldPolicy, decode_message, decode_message_with_options, encode_message,
    encoded_len,
};
pub use error::{DecodeError, EncodeError, SchemaError};
pub use model::{
    Cardinality, FieldDescriptor, FieldType, MessageDescriptor, Record, Schema, SchemaBuilder,
    Value, WireKind,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
