//! Wire layouts for domain types.
//!
//! None of these carry a length prefix; the width is implied by the type.
//!
//! | Type | Layout |
//! |---|---|
//! | [`Name`] | u64 LE |
//! | [`PublicKey`] | curve tag + 33 bytes |
//! | [`Signature`] | curve tag + 65 bytes |
//! | [`Symbol`] | precision + 6 code bytes, zero padded |
//! | [`Asset`] | i64 LE amount + symbol |
//! | [`Checksum<N>`] | N bytes |
//! | [`HexBytes`] | varint length + bytes (the one prefixed type) |

use crate::codec::primitives::{Reader, Writer};
use crate::codec::traits::{Decode, Describe, Encode};
use crate::error::DecodeError;
use crate::limits::{MAX_SYMBOL_CODE_LEN, PUBLIC_KEY_DATA_LEN, SIGNATURE_DATA_LEN, SYMBOL_WIDTH};
use crate::model::{
    Asset, Checksum, DomainKind, FieldKind, HexBytes, Name, PrimitiveKind, PublicKey, Signature,
    Symbol,
};

impl Decode for Name {
    const MIN_WIDTH: usize = 8;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_u64(context).map(Name::from_u64)
    }
}

impl Encode for Name {
    fn encode(&self, writer: &mut Writer) {
        writer.write_u64(self.as_u64());
    }
}

impl Describe for Name {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::Name)
    }
}

/// Unknown curve tags are kept as-is.
impl Decode for PublicKey {
    const MIN_WIDTH: usize = 1 + PUBLIC_KEY_DATA_LEN;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        let bytes = reader.read_array::<{ 1 + PUBLIC_KEY_DATA_LEN }>(context)?;
        let mut data = [0u8; PUBLIC_KEY_DATA_LEN];
        data.copy_from_slice(&bytes[1..]);
        Ok(PublicKey {
            curve: bytes[0],
            data,
        })
    }
}

impl Encode for PublicKey {
    fn encode(&self, writer: &mut Writer) {
        writer.write_byte(self.curve);
        writer.write_bytes(&self.data);
    }
}

impl Describe for PublicKey {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::PublicKey)
    }
}

impl Decode for Signature {
    const MIN_WIDTH: usize = 1 + SIGNATURE_DATA_LEN;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        let bytes = reader.read_array::<{ 1 + SIGNATURE_DATA_LEN }>(context)?;
        let mut data = [0u8; SIGNATURE_DATA_LEN];
        data.copy_from_slice(&bytes[1..]);
        Ok(Signature {
            curve: bytes[0],
            data,
        })
    }
}

impl Encode for Signature {
    fn encode(&self, writer: &mut Writer) {
        writer.write_byte(self.curve);
        writer.write_bytes(&self.data);
    }
}

impl Describe for Signature {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::Signature)
    }
}

/// Code bytes are taken verbatim; nothing checks they are uppercase ASCII.
impl Decode for Symbol {
    const MIN_WIDTH: usize = SYMBOL_WIDTH;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        let bytes = reader.read_array::<SYMBOL_WIDTH>(context)?;
        let mut code = [0u8; MAX_SYMBOL_CODE_LEN];
        code.copy_from_slice(&bytes[1..]);
        Ok(Symbol::from_raw(bytes[0], code))
    }
}

impl Encode for Symbol {
    fn encode(&self, writer: &mut Writer) {
        writer.write_byte(self.precision());
        writer.write_bytes(self.raw_code());
    }
}

impl Describe for Symbol {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::Symbol)
    }
}

/// Amount and symbol are read as one block.
impl Decode for Asset {
    const MIN_WIDTH: usize = 8 + SYMBOL_WIDTH;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        let bytes = reader.read_array::<{ 8 + SYMBOL_WIDTH }>(context)?;
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&bytes[..8]);
        let mut code = [0u8; MAX_SYMBOL_CODE_LEN];
        code.copy_from_slice(&bytes[9..]);
        Ok(Asset::new(
            i64::from_le_bytes(amount),
            Symbol::from_raw(bytes[8], code),
        ))
    }
}

impl Encode for Asset {
    fn encode(&self, writer: &mut Writer) {
        writer.write_i64(self.amount);
        self.symbol.encode(writer);
    }
}

impl Describe for Asset {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::Asset)
    }
}

impl<const N: usize> Decode for Checksum<N> {
    const MIN_WIDTH: usize = N;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_array(context).map(Checksum)
    }
}

impl<const N: usize> Encode for Checksum<N> {
    fn encode(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }
}

impl<const N: usize> Describe for Checksum<N> {
    fn field_kind() -> FieldKind {
        FieldKind::Domain(DomainKind::Checksum(N))
    }
}

impl Decode for HexBytes {
    const MIN_WIDTH: usize = 1;

    fn decode(reader: &mut Reader<'_>, context: &'static str) -> Result<Self, DecodeError> {
        reader.read_bytes_prefixed(context).map(HexBytes)
    }
}

impl Encode for HexBytes {
    fn encode(&self, writer: &mut Writer) {
        writer.write_bytes_prefixed(&self.0);
    }
}

impl Describe for HexBytes {
    fn field_kind() -> FieldKind {
        FieldKind::Primitive(PrimitiveKind::Bytes)
    }
}
