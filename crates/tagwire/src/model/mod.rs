//! Data model: schema descriptors and the in-memory record types.
//!
//! - Field-level metadata (wire kinds, declared types, descriptors)
//! - Message descriptors and the schema container
//! - Records (dynamically typed field values)
//! - The schema builder (the compile step the IDL parser targets)

pub mod builder;
pub mod field;
pub mod message;
pub mod record;

pub use builder::{MessageBuilder, SchemaBuilder};
pub use field::{Cardinality, FieldDescriptor, FieldType, WireKind};
pub use message::{MessageDescriptor, Schema};
pub use record::{Record, Value};
