//! Dynamic values produced by descriptor-driven decoding.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::model::{Asset, Name, PublicKey, Signature, Symbol};

/// Wire text, kept byte-for-byte.
///
/// The node does not validate the text it stores, so a string field may hold
/// bytes that are not UTF-8. `WireString` keeps them exactly; use
/// [`as_str`](Self::as_str) or [`to_string_lossy`](Self::to_string_lossy) to
/// read it as text.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireString(Vec<u8>);

impl WireString {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for WireString {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for WireString {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl fmt::Display for WireString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for WireString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl Serialize for WireString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// A `u32` sent as a varint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarUint32(pub u32);

/// A `u64` sent as a varint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarUint64(pub u64);

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    VarUint32(u32),
    VarUint64(u64),
    Bytes(Vec<u8>),
    String(WireString),
    Name(Name),
    PublicKey(PublicKey),
    Signature(Signature),
    Symbol(Symbol),
    Asset(Asset),
    /// Fixed-length digest; the length is the descriptor's.
    Checksum(Vec<u8>),
    Record(Record),
    Sequence(Vec<Value>),
}

impl Value {
    /// Returns a short name for the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::U8(_) => "uint8",
            Value::U16(_) => "uint16",
            Value::U32(_) => "uint32",
            Value::U64(_) => "uint64",
            Value::I8(_) => "int8",
            Value::I16(_) => "int16",
            Value::I32(_) => "int32",
            Value::I64(_) => "int64",
            Value::VarUint32(_) => "varuint32",
            Value::VarUint64(_) => "varuint64",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Name(_) => "name",
            Value::PublicKey(_) => "public_key",
            Value::Signature(_) => "signature",
            Value::Symbol(_) => "symbol",
            Value::Asset(_) => "asset",
            Value::Checksum(_) => "checksum",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns any unsigned integer value widened to u64.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v as u64),
            Value::U16(v) => Some(v as u64),
            Value::U32(v) | Value::VarUint32(v) => Some(v as u64),
            Value::U64(v) | Value::VarUint64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns any signed integer value widened to i64.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v as i64),
            Value::I16(v) => Some(v as i64),
            Value::I32(v) => Some(v as i64),
            Value::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) | Value::Checksum(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<Name> {
        match self {
            Value::Name(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Value::Asset(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// A decoded record: field values in wire order, named after the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    type_name: Cow<'static, str>,
    fields: Vec<(Cow<'static, str>, Value)>,
}

impl Record {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_capacity(type_name, 0)
    }

    pub fn with_capacity(type_name: impl Into<Cow<'static, str>>, capacity: usize) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field, builder style.
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<Cow<'static, str>>, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the first field with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterates `(name, value)` pairs in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_ref(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
