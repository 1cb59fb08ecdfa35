//! Compiled message descriptors and the schema container.

use rustc_hash::FxHashMap;

use crate::model::field::FieldDescriptor;

/// Compiled, immutable metadata for one message.
///
/// Lookup maps by field name and by wire tag are built once when the
/// schema is compiled; descriptors are never touched during
/// decode/encode.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) by_name: FxHashMap<String, usize>,
    pub(crate) by_tag: FxHashMap<u32, usize>,
    /// Enums scoped to this message: enum name -> (label -> value).
    pub(crate) enums: FxHashMap<String, FxHashMap<String, i32>>,
}

impl MessageDescriptor {
    /// The message's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by its wire tag.
    pub fn field_by_tag(&self, tag: u32) -> Option<&FieldDescriptor> {
        self.by_tag.get(&tag).map(|&i| &self.fields[i])
    }

    /// Looks up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Returns true if this message scopes an enum named `name`.
    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// The label-to-value table of a scoped enum, if declared.
    pub fn enum_values(&self, name: &str) -> Option<&FxHashMap<String, i32>> {
        self.enums.get(name)
    }
}

/// A compiled schema: message name to descriptor.
///
/// Built once by [`SchemaBuilder`](crate::model::SchemaBuilder) and
/// shared read-only for the lifetime of all codec calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub(crate) messages: FxHashMap<String, MessageDescriptor>,
}

impl Schema {
    /// Looks up a message descriptor by name.
    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(name)
    }

    /// Iterates message names in no particular order.
    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Number of messages in the schema.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the schema holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Cardinality, SchemaBuilder};

    #[test]
    fn test_schema_introspection() {
        let schema = SchemaBuilder::new()
            .message("Light", |m| {
                m.enum_type("Color", [("RED", 0), ("GREEN", 1)])
                    .field("color", "Color", Cardinality::Optional, 1)
            })
            .message("Empty", |m| m)
            .build()
            .unwrap();

        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
        let mut names: Vec<&str> = schema.message_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["Empty", "Light"]);

        let desc = schema.message("Light").unwrap();
        assert_eq!(desc.name(), "Light");
        assert_eq!(desc.fields().len(), 1);
        assert!(desc.has_enum("Color"));
        assert!(!desc.has_enum("Shape"));
        assert!(schema.message("Empty").unwrap().fields().is_empty());
    }
}
