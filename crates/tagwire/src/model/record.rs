//! In-memory record representation: dynamically typed field values.

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// int32, sint32, sfixed32, or a raw enum label.
    Int32(i32),
    /// uint32 or fixed32.
    Uint32(u32),
    /// int64, sint64, or sfixed64.
    Int64(i64),
    /// uint64 or fixed64.
    Uint64(u64),
    Bool(bool),
    /// 32-bit IEEE 754, bit pattern preserved across the wire.
    Float(f32),
    /// 64-bit IEEE 754, bit pattern preserved across the wire.
    Double(f64),
    Bytes(Vec<u8>),
    Str(String),
    /// Embedded message.
    Message(Record),
    /// Ordered elements of a repeated field.
    Repeated(Vec<Value>),
}

impl Value {
    /// Human-readable name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int32(_) => "int32",
            Value::Uint32(_) => "uint32",
            Value::Int64(_) => "int64",
            Value::Uint64(_) => "uint64",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Message(_) => "message",
            Value::Repeated(_) => "repeated",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::Uint32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::Uint64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Value {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value {
        Value::Bytes(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Value {
        Value::Message(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::Repeated(v)
    }
}

/// A field-name-to-value mapping produced by decoding and consumed by
/// encoding.
///
/// Insertion order is preserved so encoding is deterministic, but
/// equality is content-based: two records with the same fields in a
/// different order compare equal.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Record {
        Record::default()
    }

    /// Sets a field, overwriting any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Fluent variant of [`set`](Record::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Record {
        self.set(name, value);
        self
    }

    /// Appends to the repeated sequence under `name`, creating an empty
    /// sequence on first encounter.
    pub fn push_repeated(&mut self, name: &str, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, Value::Repeated(items))) => items.push(value),
            Some((_, slot)) => *slot = Value::Repeated(vec![value]),
            None => self
                .entries
                .push((name.to_string(), Value::Repeated(vec![value]))),
        }
    }

    /// Returns the value under `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns true if a field named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Record) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Record {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}
