//! Typed encoding/decoding.
//!
//! [`Decode`] is the extension point: any type that knows its own wire
//! layout implements it, and containers ([`Vec`], records declared with
//! [`binary_struct!`](crate::binary_struct)) decode their parts through it.
//! [`Describe`] maps a type to the [`FieldKind`] a
//! [`TypeDescriptor`](crate::model::TypeDescriptor) uses for it, so a typed
//! record and its descriptor always agree on layout.

use crate::codec::primitives::{DecodeOptions, Reader, Writer};
use crate::error::DecodeError;
use crate::limits::MAX_PREALLOC_ELEMENTS;
use crate::model::{FieldKind, PrimitiveKind, VarUint32, VarUint64, WireString};

/// A type that can be read off the wire.
pub trait Decode: Sized {
    /// Fewest bytes any value of this type occupies on the wire. Sequences
    /// use it to reject counts the input can't hold; `0` means values may
    /// take no bytes at all, which caps the count instead.
    const MIN_WIDTH: usize = 0;

    /// Decodes one value. `context` names the field being read and ends up
    /// in error messages.
    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError>;
}

/// A type that can be written to the wire.
pub trait Encode {
    fn encode(&self, writer: &mut Writer);

    /// Encodes into a fresh buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        self.encode(&mut writer);
        writer.into_bytes()
    }
}

/// A type with a known field kind.
pub trait Describe {
    fn field_kind() -> FieldKind;
}

/// Decodes a whole buffer as `T` with default options.
pub fn decode_bytes<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    decode_bytes_with_options(bytes, DecodeOptions::default())
}

/// Decodes a whole buffer as `T`.
///
/// Bytes left over after `T` are ignored unless
/// [`DecodeOptions::reject_trailing_bytes`] is set.
pub fn decode_bytes_with_options<T: Decode>(
    bytes: &[u8],
    options: DecodeOptions,
) -> Result<T, DecodeError> {
    let type_name = std::any::type_name::<T>();
    let mut reader = Reader::with_options(bytes, options);
    let value = T::decode(&mut reader, type_name)?;
    reader.finish(type_name)?;
    Ok(value)
}

macro_rules! impl_primitive {
    ($($ty:ty => $read:ident, $write:ident, $kind:ident;)*) => {$(
        impl Decode for $ty {
            const MIN_WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
                reader.$read(context)
            }
        }

        impl Encode for $ty {
            #[inline]
            fn encode(&self, writer: &mut Writer) {
                writer.$write(*self);
            }
        }

        impl Describe for $ty {
            fn field_kind() -> FieldKind {
                FieldKind::Primitive(PrimitiveKind::$kind)
            }
        }
    )*};
}

impl_primitive! {
    bool => read_bool, write_bool, Bool;
    u8 => read_byte, write_byte, U8;
    u16 => read_u16, write_u16, U16;
    u32 => read_u32, write_u32, U32;
    u64 => read_u64, write_u64, U64;
    i8 => read_i8, write_i8, I8;
    i16 => read_i16, write_i16, I16;
    i32 => read_i32, write_i32, I32;
    i64 => read_i64, write_i64, I64;
}

impl Decode for VarUint32 {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_varuint32(context).map(VarUint32)
    }
}

impl Encode for VarUint32 {
    fn encode(&self, writer: &mut Writer) {
        writer.write_varint(self.0 as u64);
    }
}

impl Describe for VarUint32 {
    fn field_kind() -> FieldKind {
        FieldKind::Primitive(PrimitiveKind::VarUint32)
    }
}

impl Decode for VarUint64 {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_varint(context).map(VarUint64)
    }
}

impl Encode for VarUint64 {
    fn encode(&self, writer: &mut Writer) {
        writer.write_varint(self.0);
    }
}

impl Describe for VarUint64 {
    fn field_kind() -> FieldKind {
        FieldKind::Primitive(PrimitiveKind::VarUint64)
    }
}

/// Invalid UTF-8 is replaced, not rejected; see [`Reader::read_string`].
impl Decode for String {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_string(context)
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut Writer) {
        writer.write_string(self);
    }
}

impl Describe for String {
    fn field_kind() -> FieldKind {
        FieldKind::Primitive(PrimitiveKind::String)
    }
}

impl Decode for WireString {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_bytes_prefixed(context).map(WireString::from_bytes)
    }
}

impl Encode for WireString {
    fn encode(&self, writer: &mut Writer) {
        writer.write_bytes_prefixed(self.as_bytes());
    }
}

impl Describe for WireString {
    fn field_kind() -> FieldKind {
        FieldKind::Primitive(PrimitiveKind::String)
    }
}

/// Varint count followed by the elements, in order.
impl<T: Decode> Decode for Vec<T> {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        let count = reader.read_sequence_len(T::MIN_WIDTH, context)?;
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            items.push(T::decode(reader, context)?);
        }
        Ok(items)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut Writer) {
        writer.write_varint(self.len() as u64);
        for item in self {
            item.encode(writer);
        }
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn field_kind() -> FieldKind {
        FieldKind::sequence_of(T::field_kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_u64_row() {
        let bytes = hex::decode("0100000000000000").unwrap();
        assert_eq!(decode_bytes::<u64>(&bytes).unwrap(), 1);
    }

    #[test]
    fn test_integer_roundtrips() {
        assert_eq!(decode_bytes::<i8>(&(-5i8).to_bytes()).unwrap(), -5);
        assert_eq!(decode_bytes::<u16>(&u16::MAX.to_bytes()).unwrap(), u16::MAX);
        assert_eq!(decode_bytes::<i32>(&i32::MIN.to_bytes()).unwrap(), i32::MIN);
        assert_eq!(decode_bytes::<u32>(&0xDEADBEEFu32.to_bytes()).unwrap(), 0xDEADBEEF);
        assert_eq!(decode_bytes::<i64>(&(-1i64).to_bytes()).unwrap(), -1);
        assert_eq!(0x0102u16.to_bytes(), vec![0x02, 0x01]);
    }

    #[test]
    fn test_varuint_wrappers() {
        assert_eq!(VarUint32(300).to_bytes(), vec![0xAC, 0x02]);
        assert_eq!(decode_bytes::<VarUint32>(&[0xAC, 0x02]).unwrap(), VarUint32(300));
        assert_eq!(decode_bytes::<VarUint64>(&VarUint64(u64::MAX).to_bytes()).unwrap(), VarUint64(u64::MAX));
    }

    #[test]
    fn test_vec_in_order() {
        let items = vec![3u16, 1, 2];
        let bytes = items.to_bytes();
        assert_eq!(bytes[0], 3);
        assert_eq!(decode_bytes::<Vec<u16>>(&bytes).unwrap(), items);
        assert_eq!(<Vec<u16>>::field_kind(), FieldKind::sequence_of(PrimitiveKind::U16));
    }

    #[test]
    fn test_vec_huge_count_fails_cleanly() {
        // count = u64::MAX, no elements
        let mut writer = Writer::new();
        writer.write_varint(u64::MAX);
        let err = decode_bytes::<Vec<u32>>(writer.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfBuffer { .. }));
    }

    #[test]
    fn test_vec_count_checked_before_elements() {
        // 3 u32s declared, 8 bytes present
        let bytes = [3, 1, 0, 0, 0, 2, 0, 0, 0];
        let err = decode_bytes::<Vec<u32>>(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfBuffer { offset: 1, needed: 12, remaining: 8, .. }
        ));
        assert_eq!(<Vec<Vec<u8>>>::MIN_WIDTH, 1);
        assert_eq!(<Vec<u8>>::MIN_WIDTH, 1);
    }

    crate::binary_struct! {
        #[derive(Debug, Clone, PartialEq)]
        struct Cycle {}
    }

    #[test]
    fn test_vec_of_empty_records_capped() {
        assert_eq!(Cycle::MIN_WIDTH, 0);

        let mut writer = Writer::new();
        writer.write_varint(2);
        assert_eq!(decode_bytes::<Vec<Cycle>>(writer.as_bytes()).unwrap(), [Cycle {}, Cycle {}]);

        let err = decode_bytes::<Vec<Cycle>>(&[0x80, 0xE1, 0xEB, 0x17]).unwrap_err();
        assert!(matches!(err, DecodeError::SequenceTooLong { count: 50_000_000, offset: 0, .. }));

        // an outer vec of inner vecs still needs one count byte per element
        let err = decode_bytes::<Vec<Vec<Cycle>>>(&[0x80, 0xE1, 0xEB, 0x17]).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfBuffer { needed: 50_000_000, .. }));
    }

    #[test]
    fn test_trailing_bytes_option() {
        let bytes = [1u8, 0, 0, 0, 9];
        assert_eq!(decode_bytes::<u32>(&bytes).unwrap(), 1);
        let err = decode_bytes_with_options::<u32>(&bytes, DecodeOptions::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingBytes { remaining: 1, .. }));
    }

    #[test]
    fn test_wire_string_preserves_invalid_utf8() {
        let mut writer = Writer::new();
        writer.write_bytes_prefixed(&[0xFF, 0xFE]);
        let s = decode_bytes::<WireString>(writer.as_bytes()).unwrap();
        assert_eq!(s.as_bytes(), &[0xFF, 0xFE]);
        assert_eq!(s.to_bytes(), writer.into_bytes());
    }
}
