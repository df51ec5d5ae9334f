//! Type descriptors: the caller's description of a row's layout.
//!
//! A [`TypeDescriptor`] lists a record's fields in wire order. It is built
//! once (by hand with [`TypeDescriptor::builder`], or generated by
//! [`binary_struct!`](crate::binary_struct)) and is immutable afterwards, so
//! one descriptor can drive any number of concurrent decodes.
//!
//! ```rust
//! use eos_binary::model::{DomainKind, FieldKind, PrimitiveKind, TypeDescriptor};
//!
//! let transfer = TypeDescriptor::builder("transfer")
//!     .field("from", DomainKind::Name)
//!     .field("to", DomainKind::Name)
//!     .field("quantity", DomainKind::Asset)
//!     .field("memo", PrimitiveKind::String)
//!     .build();
//!
//! assert_eq!(transfer.fields().len(), 4);
//! assert_eq!(transfer.to_string(), "transfer { from: name, to: name, quantity: asset, memo: string }");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::limits::{PUBLIC_KEY_DATA_LEN, SIGNATURE_DATA_LEN, SYMBOL_WIDTH};

/// Primitive field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    /// Varint that must fit in 32 bits.
    VarUint32,
    /// Varint up to 64 bits.
    VarUint64,
    /// Varint length + raw bytes.
    Bytes,
    /// Varint length + text bytes.
    String,
}

impl PrimitiveKind {
    /// Returns the ABI type name.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::U8 => "uint8",
            PrimitiveKind::U16 => "uint16",
            PrimitiveKind::U32 => "uint32",
            PrimitiveKind::U64 => "uint64",
            PrimitiveKind::I8 => "int8",
            PrimitiveKind::I16 => "int16",
            PrimitiveKind::I32 => "int32",
            PrimitiveKind::I64 => "int64",
            PrimitiveKind::VarUint32 => "varuint32",
            PrimitiveKind::VarUint64 => "varuint64",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::String => "string",
        }
    }

    /// Returns the encoded width, or `None` for variable-width kinds.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::U8 | PrimitiveKind::I8 => Some(1),
            PrimitiveKind::U16 | PrimitiveKind::I16 => Some(2),
            PrimitiveKind::U32 | PrimitiveKind::I32 => Some(4),
            PrimitiveKind::U64 | PrimitiveKind::I64 => Some(8),
            PrimitiveKind::VarUint32
            | PrimitiveKind::VarUint64
            | PrimitiveKind::Bytes
            | PrimitiveKind::String => None,
        }
    }
}

/// Domain types with a dedicated fixed wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// 8-byte account name.
    Name,
    /// Curve tag + 33 bytes.
    PublicKey,
    /// Curve tag + 65 bytes.
    Signature,
    /// Precision + 6 code bytes.
    Symbol,
    /// 8-byte amount + symbol.
    Asset,
    /// Fixed-length digest of the given width in bytes.
    Checksum(usize),
}

impl DomainKind {
    /// Returns the ABI type name.
    pub fn name(self) -> &'static str {
        match self {
            DomainKind::Name => "name",
            DomainKind::PublicKey => "public_key",
            DomainKind::Signature => "signature",
            DomainKind::Symbol => "symbol",
            DomainKind::Asset => "asset",
            DomainKind::Checksum(20) => "checksum160",
            DomainKind::Checksum(32) => "checksum256",
            DomainKind::Checksum(64) => "checksum512",
            DomainKind::Checksum(_) => "checksum",
        }
    }

    /// Returns the encoded width in bytes.
    pub fn width(self) -> usize {
        match self {
            DomainKind::Name => 8,
            DomainKind::PublicKey => 1 + PUBLIC_KEY_DATA_LEN,
            DomainKind::Signature => 1 + SIGNATURE_DATA_LEN,
            DomainKind::Symbol => SYMBOL_WIDTH,
            DomainKind::Asset => 8 + SYMBOL_WIDTH,
            DomainKind::Checksum(len) => len,
        }
    }
}

/// What a field holds and therefore how it is laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    Domain(DomainKind),
    /// Nested record, packed inline.
    Record(Arc<TypeDescriptor>),
    /// Varint count followed by that many elements.
    Sequence(Box<FieldKind>),
    /// A caller type with no binary representation (e.g. a JSON-only
    /// timestamp). Decoding it always fails.
    Opaque(&'static str),
}

impl FieldKind {
    /// Creates a sequence of the given element kind.
    pub fn sequence_of(element: impl Into<FieldKind>) -> Self {
        FieldKind::Sequence(Box::new(element.into()))
    }

    /// Returns the encoded width if every value of this kind has the same width.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            FieldKind::Primitive(kind) => kind.fixed_width(),
            FieldKind::Domain(kind) => Some(kind.width()),
            FieldKind::Record(descriptor) => descriptor.fixed_width(),
            FieldKind::Sequence(_) | FieldKind::Opaque(_) => None,
        }
    }

    /// Returns the fewest bytes a value of this kind occupies. Variable
    /// kinds take at least their one-byte length prefix; an empty record
    /// takes none.
    pub fn min_width(&self) -> usize {
        match self {
            FieldKind::Primitive(kind) => kind.fixed_width().unwrap_or(1),
            FieldKind::Domain(kind) => kind.width(),
            FieldKind::Record(descriptor) => descriptor.min_width(),
            FieldKind::Sequence(_) => 1,
            FieldKind::Opaque(_) => 0,
        }
    }
}

impl From<PrimitiveKind> for FieldKind {
    fn from(kind: PrimitiveKind) -> Self {
        FieldKind::Primitive(kind)
    }
}

impl From<DomainKind> for FieldKind {
    fn from(kind: DomainKind) -> Self {
        FieldKind::Domain(kind)
    }
}

impl From<Arc<TypeDescriptor>> for FieldKind {
    fn from(descriptor: Arc<TypeDescriptor>) -> Self {
        FieldKind::Record(descriptor)
    }
}

impl From<TypeDescriptor> for FieldKind {
    fn from(descriptor: TypeDescriptor) -> Self {
        FieldKind::Record(Arc::new(descriptor))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(kind) => f.write_str(kind.name()),
            FieldKind::Domain(kind) => f.write_str(kind.name()),
            FieldKind::Record(descriptor) => f.write_str(descriptor.name()),
            FieldKind::Sequence(element) => write!(f, "{}[]", element),
            FieldKind::Opaque(name) => write!(f, "opaque<{}>", name),
        }
    }
}

/// One named field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Field name, used only in diagnostics and dynamic lookups.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Ordered field layout of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor from its fields, in wire order.
    pub fn new(name: impl Into<Cow<'static, str>>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Starts building a descriptor.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the encoded width if every field has a fixed width.
    pub fn fixed_width(&self) -> Option<usize> {
        self.fields
            .iter()
            .try_fold(0usize, |acc, f| Some(acc + f.kind().fixed_width()?))
    }

    /// Returns the fewest bytes a record of this type occupies.
    pub fn min_width(&self) -> usize {
        self.fields.iter().map(|f| f.kind().min_width()).sum()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}: {}", sep, field.name(), field.kind())?;
        }
        if self.fields.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

/// Builder for [`TypeDescriptor`].
#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Appends a field. Fields are decoded in the order they are added.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, kind: impl Into<FieldKind>) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Appends a sequence field.
    pub fn sequence(self, name: impl Into<Cow<'static, str>>, element: impl Into<FieldKind>) -> Self {
        self.field(name, FieldKind::sequence_of(element))
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(self.name, self.fields)
    }

    /// Builds a descriptor ready to be shared between decoders.
    pub fn build_shared(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("currency")
            .field("precision", PrimitiveKind::U8)
            .field("code", DomainKind::Name)
            .build_shared()
    }

    #[test]
    fn test_builder_keeps_declared_order() {
        let d = TypeDescriptor::builder("row")
            .field("b", PrimitiveKind::U32)
            .field("a", PrimitiveKind::Bool)
            .sequence("c", PrimitiveKind::U8)
            .build();
        let names: Vec<_> = d.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(d.field("c").unwrap().kind(), &FieldKind::sequence_of(PrimitiveKind::U8));
        assert!(d.field("missing").is_none());
    }

    #[test]
    fn test_fixed_width() {
        let balance = TypeDescriptor::builder("balance")
            .field("currency", currency())
            .field("amount", PrimitiveKind::U64)
            .build();
        assert_eq!(balance.fixed_width(), Some(1 + 8 + 8));

        let with_memo = TypeDescriptor::builder("memo")
            .field("amount", DomainKind::Asset)
            .field("memo", PrimitiveKind::String)
            .build();
        assert_eq!(with_memo.fixed_width(), None);
        assert_eq!(with_memo.min_width(), 15 + 1);
        assert_eq!(TypeDescriptor::builder("empty").build().min_width(), 0);

        assert_eq!(DomainKind::Asset.width(), 15);
        assert_eq!(DomainKind::PublicKey.width(), 34);
        assert_eq!(DomainKind::Signature.width(), 66);
    }

    #[test]
    fn test_display() {
        let d = TypeDescriptor::builder("holder")
            .sequence("currencies", currency())
            .field("when", FieldKind::Opaque("JSONTime"))
            .field("id", DomainKind::Checksum(32))
            .build();
        assert_eq!(
            d.to_string(),
            "holder { currencies: currency[], when: opaque<JSONTime>, id: checksum256 }"
        );
        assert_eq!(TypeDescriptor::builder("empty").build().to_string(), "empty {}");
    }

    #[test]
    fn test_descriptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeDescriptor>();
        assert_send_sync::<Arc<TypeDescriptor>>();
    }
}
