//! Field-level schema types: wire kinds, cardinality, and declared types.

/// Payload shape identifier, the low 3 bits of a tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireKind {
    /// Base-128 continuation-encoded integer.
    Varint = 0,
    /// 8 raw bytes, little-endian.
    Fixed64 = 1,
    /// Varint byte count followed by that many raw bytes.
    LengthDelimited = 2,
    /// 4 raw bytes, little-endian.
    Fixed32 = 5,
}

impl WireKind {
    /// Creates a WireKind from its wire representation.
    pub fn from_u8(v: u8) -> Option<WireKind> {
        match v {
            0 => Some(WireKind::Varint),
            1 => Some(WireKind::Fixed64),
            2 => Some(WireKind::LengthDelimited),
            5 => Some(WireKind::Fixed32),
            _ => None,
        }
    }
}

/// How many values a field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Required,
    Optional,
    Repeated,
}

/// A field's declared type, resolved at schema-compile time.
///
/// Enum and message references carry the resolved name of their target;
/// the codec never re-derives them from strings while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int32,
    Uint32,
    Sint32,
    Int64,
    Uint64,
    Sint64,
    Bool,
    Fixed32,
    Sfixed32,
    Float,
    Fixed64,
    Sfixed64,
    Double,
    Bytes,
    String,
    /// Enum scoped to the enclosing message; labels travel as raw varints.
    Enum(String),
    /// Embedded message, length-delimited and decoded recursively.
    Message(String),
}

impl FieldType {
    /// Resolves a scalar type keyword, or None if the name must be an
    /// enum or message reference.
    pub fn from_keyword(keyword: &str) -> Option<FieldType> {
        match keyword {
            "int32" => Some(FieldType::Int32),
            "uint32" => Some(FieldType::Uint32),
            "sint32" => Some(FieldType::Sint32),
            "int64" => Some(FieldType::Int64),
            "uint64" => Some(FieldType::Uint64),
            "sint64" => Some(FieldType::Sint64),
            "bool" => Some(FieldType::Bool),
            "fixed32" => Some(FieldType::Fixed32),
            "sfixed32" => Some(FieldType::Sfixed32),
            "float" => Some(FieldType::Float),
            "fixed64" => Some(FieldType::Fixed64),
            "sfixed64" => Some(FieldType::Sfixed64),
            "double" => Some(FieldType::Double),
            "bytes" => Some(FieldType::Bytes),
            "string" => Some(FieldType::String),
            _ => None,
        }
    }

    /// Returns the wire kind this type encodes with.
    pub fn wire_kind(&self) -> WireKind {
        match self {
            FieldType::Int32
            | FieldType::Uint32
            | FieldType::Sint32
            | FieldType::Int64
            | FieldType::Uint64
            | FieldType::Sint64
            | FieldType::Bool
            | FieldType::Enum(_) => WireKind::Varint,
            FieldType::Fixed64 | FieldType::Sfixed64 | FieldType::Double => WireKind::Fixed64,
            FieldType::Fixed32 | FieldType::Sfixed32 | FieldType::Float => WireKind::Fixed32,
            FieldType::Bytes | FieldType::String | FieldType::Message(_) => {
                WireKind::LengthDelimited
            }
        }
    }

    /// Human-readable name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Int32 => "int32",
            FieldType::Uint32 => "uint32",
            FieldType::Sint32 => "sint32",
            FieldType::Int64 => "int64",
            FieldType::Uint64 => "uint64",
            FieldType::Sint64 => "sint64",
            FieldType::Bool => "bool",
            FieldType::Fixed32 => "fixed32",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Float => "float",
            FieldType::Fixed64 => "fixed64",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Double => "double",
            FieldType::Bytes => "bytes",
            FieldType::String => "string",
            FieldType::Enum(_) => "enum",
            FieldType::Message(_) => "message",
        }
    }
}

/// Compiled, immutable metadata for one field.
///
/// All lookup metadata (including the field's own name) is attached when
/// the schema is built; nothing is computed lazily during decode/encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name within the enclosing message.
    pub name: String,
    /// Wire tag, unique within the message, in `[1, 2^29 - 1]`.
    pub tag: u32,
    /// Resolved declared type.
    pub field_type: FieldType,
    /// Required, optional, or repeated.
    pub cardinality: Cardinality,
}

impl FieldDescriptor {
    /// The varint tag key emitted before this field's payload.
    pub fn key(&self) -> u32 {
        (self.tag << 3) | self.field_type.wire_kind() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_kind_from_u8() {
        assert_eq!(WireKind::from_u8(0), Some(WireKind::Varint));
        assert_eq!(WireKind::from_u8(1), Some(WireKind::Fixed64));
        assert_eq!(WireKind::from_u8(2), Some(WireKind::LengthDelimited));
        assert_eq!(WireKind::from_u8(5), Some(WireKind::Fixed32));
        assert_eq!(WireKind::from_u8(3), None);
        assert_eq!(WireKind::from_u8(4), None);
        assert_eq!(WireKind::from_u8(6), None);
    }

    #[test]
    fn test_wire_kind_mapping() {
        assert_eq!(FieldType::Int32.wire_kind(), WireKind::Varint);
        assert_eq!(FieldType::Sint64.wire_kind(), WireKind::Varint);
        assert_eq!(FieldType::Bool.wire_kind(), WireKind::Varint);
        assert_eq!(FieldType::Enum("Color".into()).wire_kind(), WireKind::Varint);
        assert_eq!(FieldType::Double.wire_kind(), WireKind::Fixed64);
        assert_eq!(FieldType::Sfixed64.wire_kind(), WireKind::Fixed64);
        assert_eq!(FieldType::Float.wire_kind(), WireKind::Fixed32);
        assert_eq!(FieldType::Fixed32.wire_kind(), WireKind::Fixed32);
        assert_eq!(FieldType::Bytes.wire_kind(), WireKind::LengthDelimited);
        assert_eq!(FieldType::String.wire_kind(), WireKind::LengthDelimited);
        assert_eq!(
            FieldType::Message("Inner".into()).wire_kind(),
            WireKind::LengthDelimited
        );
    }

    #[test]
    fn test_keyword_resolution() {
        assert_eq!(FieldType::from_keyword("sint32"), Some(FieldType::Sint32));
        assert_eq!(FieldType::from_keyword("double"), Some(FieldType::Double));
        assert_eq!(FieldType::from_keyword("Color"), None);
    }

    #[test]
    fn test_field_key() {
        let field = FieldDescriptor {
            name: "s".into(),
            tag: 2,
            field_type: FieldType::String,
            cardinality: Cardinality::Optional,
        };
        assert_eq!(field.key(), 0x12);
    }
}
