//! Builder API for compiling a schema.
//!
//! This is the target of the external IDL parser: it feeds declared
//! field descriptions in as strings, and [`SchemaBuilder::build`]
//! resolves them into the closed [`FieldType`] discriminator, validates
//! tags, and freezes the result into an immutable [`Schema`].
//!
//! # Example
//!
//! ```rust
//! use tagwire::{Cardinality, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .message("Test1", |m| m.field("a", "int32", Cardinality::Optional, 1))
//!     .build()
//!     .unwrap();
//! assert!(schema.message("Test1").is_some());
//! ```

use rustc_hash::FxHashMap;

use crate::error::SchemaError;
use crate::limits::MAX_TAG;
use crate::model::field::{Cardinality, FieldDescriptor, FieldType};
use crate::model::message::{MessageDescriptor, Schema};

/// One field as declared, before type resolution.
#[derive(Debug, Clone)]
struct RawField {
    name: String,
    declared: String,
    cardinality: Cardinality,
    tag: u32,
}

/// One message as declared.
#[derive(Debug, Clone)]
struct RawMessage {
    name: String,
    fields: Vec<RawField>,
    enums: FxHashMap<String, FxHashMap<String, i32>>,
}

/// Collects field declarations for one message.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    fields: Vec<RawField>,
    enums: FxHashMap<String, FxHashMap<String, i32>>,
}

impl MessageBuilder {
    fn new() -> MessageBuilder {
        MessageBuilder {
            fields: Vec::new(),
            enums: FxHashMap::default(),
        }
    }

    /// Declares a field. `declared` is a scalar keyword (`"int32"`,
    /// `"string"`, ...), the name of an enum scoped to this message, or
    /// the name of another message in the schema.
    pub fn field(
        mut self,
        name: impl Into<String>,
        declared: impl Into<String>,
        cardinality: Cardinality,
        tag: u32,
    ) -> MessageBuilder {
        self.fields.push(RawField {
            name: name.into(),
            declared: declared.into(),
            cardinality,
            tag,
        });
        self
    }

    /// Declares an enum scoped to this message.
    pub fn enum_type<'a>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (&'a str, i32)>,
    ) -> MessageBuilder {
        let table = values
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect();
        self.enums.insert(name.into(), table);
        self
    }
}

/// Builder for a compiled [`Schema`].
///
/// Declaration methods are infallible; all validation happens in
/// [`build`](SchemaBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    messages: Vec<RawMessage>,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    pub fn new() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Declares a message using a builder closure.
    pub fn message<F>(mut self, name: impl Into<String>, f: F) -> SchemaBuilder
    where
        F: FnOnce(MessageBuilder) -> MessageBuilder,
    {
        let builder = f(MessageBuilder::new());
        self.messages.push(RawMessage {
            name: name.into(),
            fields: builder.fields,
            enums: builder.enums,
        });
        self
    }

    /// Resolves and validates all declarations, producing an immutable
    /// schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::default();

        for raw in &self.messages {
            if schema.messages.contains_key(&raw.name) {
                return Err(SchemaError::DuplicateMessage {
                    name: raw.name.clone(),
                });
            }
            // Placeholder so forward and self references resolve below.
            schema.messages.insert(
                raw.name.clone(),
                MessageDescriptor {
                    name: raw.name.clone(),
                    fields: Vec::new(),
                    by_name: FxHashMap::default(),
                    by_tag: FxHashMap::default(),
                    enums: raw.enums.clone(),
                },
            );
        }

        let message_names: Vec<String> = self.messages.iter().map(|m| m.name.clone()).collect();

        for raw in self.messages {
            let mut fields = Vec::with_capacity(raw.fields.len());
            let mut by_name = FxHashMap::default();
            let mut by_tag = FxHashMap::default();

            for field in raw.fields {
                if field.tag == 0 || field.tag > MAX_TAG {
                    return Err(SchemaError::TagOutOfRange {
                        message: raw.name.clone(),
                        field: field.name,
                        tag: field.tag,
                    });
                }

                let field_type = resolve_type(&field.declared, &raw.enums, &message_names)
                    .ok_or_else(|| SchemaError::UnknownType {
                        message: raw.name.clone(),
                        field: field.name.clone(),
                        declared: field.declared.clone(),
                    })?;

                let index = fields.len();
                if by_name.insert(field.name.clone(), index).is_some() {
                    return Err(SchemaError::DuplicateField {
                        message: raw.name.clone(),
                        field: field.name,
                    });
                }
                if by_tag.insert(field.tag, index).is_some() {
                    return Err(SchemaError::DuplicateTag {
                        message: raw.name.clone(),
                        field: field.name,
                        tag: field.tag,
                    });
                }

                fields.push(FieldDescriptor {
                    name: field.name,
                    tag: field.tag,
                    field_type,
                    cardinality: field.cardinality,
                });
            }

            let descriptor = schema
                .messages
                .get_mut(&raw.name)
                .expect("placeholder inserted above");
            descriptor.fields = fields;
            descriptor.by_name = by_name;
            descriptor.by_tag = by_tag;
        }

        Ok(schema)
    }
}

/// Resolution order: scalar keyword, then enum scoped to the enclosing
/// message, then message reference.
fn resolve_type(
    declared: &str,
    enums: &FxHashMap<String, FxHashMap<String, i32>>,
    message_names: &[String],
) -> Option<FieldType> {
    if let Some(scalar) = FieldType::from_keyword(declared) {
        return Some(scalar);
    }
    if enums.contains_key(declared) {
        return Some(FieldType::Enum(declared.to_string()));
    }
    if message_names.iter().any(|n| n == declared) {
        return Some(FieldType::Message(declared.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_resolves_scalars() {
        let schema = SchemaBuilder::new()
            .message("Test1", |m| {
                m.field("a", "int32", Cardinality::Optional, 1)
                    .field("b", "string", Cardinality::Optional, 2)
            })
            .build()
            .unwrap();

        let desc = schema.message("Test1").unwrap();
        assert_eq!(desc.field_by_name("a").unwrap().field_type, FieldType::Int32);
        assert_eq!(desc.field_by_tag(2).unwrap().name, "b");
        assert!(desc.field_by_tag(3).is_none());
    }

    #[test]
    fn test_build_resolves_message_references() {
        let schema = SchemaBuilder::new()
            .message("Outer", |m| m.field("inner", "Inner", Cardinality::Optional, 1))
            .message("Inner", |m| m.field("x", "int32", Cardinality::Optional, 1))
            .build()
            .unwrap();

        let field = schema.message("Outer").unwrap().field_by_name("inner").unwrap();
        assert_eq!(field.field_type, FieldType::Message("Inner".into()));
    }

    #[test]
    fn test_build_resolves_scoped_enum() {
        let schema = SchemaBuilder::new()
            .message("Light", |m| {
                m.enum_type("Color", [("RED", 0), ("GREEN", 1), ("BLUE", 2)])
                    .field("color", "Color", Cardinality::Optional, 1)
            })
            .build()
            .unwrap();

        let desc = schema.message("Light").unwrap();
        assert_eq!(
            desc.field_by_name("color").unwrap().field_type,
            FieldType::Enum("Color".into())
        );
        assert_eq!(desc.enum_values("Color").unwrap()["GREEN"], 1);
    }

    #[test]
    fn test_build_rejects_unknown_type() {
        let err = SchemaBuilder::new()
            .message("M", |m| m.field("f", "NoSuchType", Cardinality::Optional, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[test]
    fn test_build_rejects_duplicate_tag() {
        let err = SchemaBuilder::new()
            .message("M", |m| {
                m.field("a", "int32", Cardinality::Optional, 1)
                    .field("b", "int32", Cardinality::Optional, 1)
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTag { tag: 1, .. }));
    }

    #[test]
    fn test_build_rejects_bad_tags() {
        let err = SchemaBuilder::new()
            .message("M", |m| m.field("a", "int32", Cardinality::Optional, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::TagOutOfRange { tag: 0, .. }));

        let err = SchemaBuilder::new()
            .message("M", |m| m.field("a", "int32", Cardinality::Optional, 1 << 29))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::TagOutOfRange { .. }));
    }

    #[test]
    fn test_build_allows_recursive_message() {
        let schema = SchemaBuilder::new()
            .message("Node", |m| {
                m.field("value", "int32", Cardinality::Optional, 1)
                    .field("next", "Node", Cardinality::Optional, 2)
            })
            .build()
            .unwrap();
        let field = schema.message("Node").unwrap().field_by_name("next").unwrap();
        assert_eq!(field.field_type, FieldType::Message("Node".into()));
    }
}
