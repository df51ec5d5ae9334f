//! Descriptor-driven decoding into dynamic [`Record`]s.
//!
//! Fields are read in descriptor order, packed with no padding. The format
//! is not self-describing: a descriptor that doesn't match the bytes either
//! runs off the end of the buffer or yields garbage values.

use crate::codec::primitives::{DecodeOptions, Reader, Writer};
use crate::codec::traits::Decode;
use crate::error::DecodeError;
use crate::limits::MAX_PREALLOC_ELEMENTS;
use crate::model::{
    Asset, DomainKind, FieldKind, Name, PrimitiveKind, PublicKey, Record, Signature, Symbol,
    TypeDescriptor, Value, WireString,
};

// =============================================================================
// DECODING
// =============================================================================

/// Checks that every field of `descriptor`, at any depth, can be decoded.
pub fn check_descriptor(descriptor: &TypeDescriptor) -> Result<(), DecodeError> {
    for field in descriptor.fields() {
        check_kind(field.name(), field.kind())?;
    }
    Ok(())
}

fn check_kind(field: &str, kind: &FieldKind) -> Result<(), DecodeError> {
    match kind {
        FieldKind::Primitive(_) | FieldKind::Domain(_) => Ok(()),
        FieldKind::Record(nested) => check_descriptor(nested),
        FieldKind::Sequence(element) => check_kind(field, element),
        FieldKind::Opaque(kind) => Err(DecodeError::UnsupportedFieldKind {
            field: field.to_string(),
            kind,
        }),
    }
}

/// Decodes one record described by `descriptor` from the reader.
pub fn decode_record(
    reader: &mut Reader<'_>,
    descriptor: &TypeDescriptor,
) -> Result<Record, DecodeError> {
    check_descriptor(descriptor)?;
    decode_fields(reader, descriptor)
}

/// Decodes a whole buffer as one record.
pub fn decode_record_bytes(
    bytes: &[u8],
    descriptor: &TypeDescriptor,
    options: DecodeOptions,
) -> Result<Record, DecodeError> {
    check_descriptor(descriptor)?;
    decode_record_checked(bytes, descriptor, options)
}

/// [`decode_record_bytes`] for a descriptor that already passed
/// [`check_descriptor`].
pub(crate) fn decode_record_checked(
    bytes: &[u8],
    descriptor: &TypeDescriptor,
    options: DecodeOptions,
) -> Result<Record, DecodeError> {
    let mut reader = Reader::with_options(bytes, options);
    let record = decode_fields(&mut reader, descriptor)?;
    reader.finish("record")?;
    Ok(record)
}

fn decode_fields(reader: &mut Reader<'_>, descriptor: &TypeDescriptor) -> Result<Record, DecodeError> {
    let mut record = Record::with_capacity(descriptor.name_cow().clone(), descriptor.fields().len());
    for field in descriptor.fields() {
        let value = decode_value(reader, field.name(), field.kind())?;
        record.push(field.name_cow().clone(), value);
    }
    Ok(record)
}

fn decode_value(reader: &mut Reader<'_>, field: &str, kind: &FieldKind) -> Result<Value, DecodeError> {
    match kind {
        FieldKind::Primitive(kind) => decode_primitive(reader, *kind),
        FieldKind::Domain(kind) => decode_domain(reader, *kind),
        FieldKind::Record(nested) => decode_fields(reader, nested).map(Value::Record),
        FieldKind::Sequence(element) => {
            let count = reader.read_sequence_len(element.min_width(), "sequence count")?;
            let mut items = Vec::with_capacity(count.min(MAX_PREALLOC_ELEMENTS));
            for _ in 0..count {
                items.push(decode_value(reader, field, element)?);
            }
            Ok(Value::Sequence(items))
        }
        FieldKind::Opaque(kind) => Err(DecodeError::UnsupportedFieldKind {
            field: field.to_string(),
            kind,
        }),
    }
}

fn decode_primitive(reader: &mut Reader<'_>, kind: PrimitiveKind) -> Result<Value, DecodeError> {
    let context = kind.name();
    Ok(match kind {
        PrimitiveKind::Bool => Value::Bool(reader.read_bool(context)?),
        PrimitiveKind::U8 => Value::U8(reader.read_byte(context)?),
        PrimitiveKind::U16 => Value::U16(reader.read_u16(context)?),
        PrimitiveKind::U32 => Value::U32(reader.read_u32(context)?),
        PrimitiveKind::U64 => Value::U64(reader.read_u64(context)?),
        PrimitiveKind::I8 => Value::I8(reader.read_i8(context)?),
        PrimitiveKind::I16 => Value::I16(reader.read_i16(context)?),
        PrimitiveKind::I32 => Value::I32(reader.read_i32(context)?),
        PrimitiveKind::I64 => Value::I64(reader.read_i64(context)?),
        PrimitiveKind::VarUint32 => Value::VarUint32(reader.read_varuint32(context)?),
        PrimitiveKind::VarUint64 => Value::VarUint64(reader.read_varint(context)?),
        PrimitiveKind::Bytes => Value::Bytes(reader.read_bytes_prefixed(context)?),
        PrimitiveKind::String => {
            Value::String(WireString::from_bytes(reader.read_bytes_prefixed(context)?))
        }
    })
}

fn decode_domain(reader: &mut Reader<'_>, kind: DomainKind) -> Result<Value, DecodeError> {
    let context = kind.name();
    Ok(match kind {
        DomainKind::Name => Value::Name(Name::decode(reader, context)?),
        DomainKind::PublicKey => Value::PublicKey(PublicKey::decode(reader, context)?),
        DomainKind::Signature => Value::Signature(Signature::decode(reader, context)?),
        DomainKind::Symbol => Value::Symbol(Symbol::decode(reader, context)?),
        DomainKind::Asset => Value::Asset(Asset::decode(reader, context)?),
        DomainKind::Checksum(len) => Value::Checksum(reader.read_bytes(len, context)?.to_vec()),
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writes a record's values in order.
///
/// The wire format carries no names or tags, so this needs no descriptor;
/// the values themselves say how they are encoded.
pub fn encode_record(writer: &mut Writer, record: &Record) {
    for value in record.values() {
        encode_value(writer, value);
    }
}

/// Writes a single value.
pub fn encode_value(writer: &mut Writer, value: &Value) {
    use crate::codec::traits::Encode;

    match value {
        Value::Bool(v) => writer.write_bool(*v),
        Value::U8(v) => writer.write_byte(*v),
        Value::U16(v) => writer.write_u16(*v),
        Value::U32(v) => writer.write_u32(*v),
        Value::U64(v) => writer.write_u64(*v),
        Value::I8(v) => writer.write_i8(*v),
        Value::I16(v) => writer.write_i16(*v),
        Value::I32(v) => writer.write_i32(*v),
        Value::I64(v) => writer.write_i64(*v),
        Value::VarUint32(v) => writer.write_varint(*v as u64),
        Value::VarUint64(v) => writer.write_varint(*v),
        Value::Bytes(bytes) => writer.write_bytes_prefixed(bytes),
        Value::String(s) => writer.write_bytes_prefixed(s.as_bytes()),
        Value::Name(name) => name.encode(writer),
        Value::PublicKey(key) => key.encode(writer),
        Value::Signature(sig) => sig.encode(writer),
        Value::Symbol(symbol) => symbol.encode(writer),
        Value::Asset(asset) => asset.encode(writer),
        Value::Checksum(bytes) => writer.write_bytes(bytes),
        Value::Record(record) => encode_record(writer, record),
        Value::Sequence(items) => {
            writer.write_varint(items.len() as u64);
            for item in items {
                encode_value(writer, item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurveType, FieldKind};

    fn currency() -> std::sync::Arc<TypeDescriptor> {
        TypeDescriptor::builder("currency")
            .field("precision", PrimitiveKind::U8)
            .field("name", DomainKind::Name)
            .build_shared()
    }

    fn currency_value(precision: u8, name: &str) -> Value {
        Value::Record(
            Record::new("currency")
                .with("precision", Value::U8(precision))
                .with("name", Value::Name(name.parse().unwrap())),
        )
    }

    fn everything() -> TypeDescriptor {
        TypeDescriptor::builder("everything")
            .field("flag", PrimitiveKind::Bool)
            .field("u8", PrimitiveKind::U8)
            .field("u16", PrimitiveKind::U16)
            .field("u32", PrimitiveKind::U32)
            .field("u64", PrimitiveKind::U64)
            .field("i8", PrimitiveKind::I8)
            .field("i16", PrimitiveKind::I16)
            .field("i32", PrimitiveKind::I32)
            .field("i64", PrimitiveKind::I64)
            .field("v32", PrimitiveKind::VarUint32)
            .field("v64", PrimitiveKind::VarUint64)
            .field("blob", PrimitiveKind::Bytes)
            .field("memo", PrimitiveKind::String)
            .field("account", DomainKind::Name)
            .field("key", DomainKind::PublicKey)
            .field("sig", DomainKind::Signature)
            .field("sym", DomainKind::Symbol)
            .field("quantity", DomainKind::Asset)
            .field("id", DomainKind::Checksum(32))
            .field("currency", currency())
            .sequence("currencies", currency())
            .build()
    }

    fn everything_record() -> Record {
        Record::new("everything")
            .with("flag", Value::Bool(true))
            .with("u8", Value::U8(u8::MAX))
            .with("u16", Value::U16(0x1234))
            .with("u32", Value::U32(u32::MAX))
            .with("u64", Value::U64(u64::MAX))
            .with("i8", Value::I8(i8::MIN))
            .with("i16", Value::I16(-2))
            .with("i32", Value::I32(i32::MIN))
            .with("i64", Value::I64(-1))
            .with("v32", Value::VarUint32(128))
            .with("v64", Value::VarUint64(u64::MAX))
            .with("blob", Value::Bytes(vec![1, 2, 3]))
            .with("memo", Value::String("hello".into()))
            .with("account", Value::Name("eosio.token".parse().unwrap()))
            .with("key", Value::PublicKey(PublicKey::new(CurveType::K1, [2; 33])))
            .with("sig", Value::Signature(Signature::new(CurveType::R1, [3; 65])))
            .with("sym", Value::Symbol(Symbol::new(4, "EOS").unwrap()))
            .with("quantity", Value::Asset("1.0000 SYX".parse().unwrap()))
            .with("id", Value::Checksum(vec![0xAA; 32]))
            .with("currency", currency_value(4, "eosio"))
            .with(
                "currencies",
                Value::Sequence(vec![currency_value(1, "a"), currency_value(2, "b")]),
            )
    }

    #[test]
    fn test_record_roundtrip() {
        let descriptor = everything();
        let record = everything_record();

        let mut writer = Writer::new();
        encode_record(&mut writer, &record);

        let decoded = decode_record_bytes(writer.as_bytes(), &descriptor, DecodeOptions::strict()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_truncation_always_end_of_buffer() {
        let mut writer = Writer::new();
        encode_record(&mut writer, &everything_record());
        let bytes = writer.into_bytes();
        let descriptor = everything();

        for cut in 0..bytes.len() {
            let err = decode_record_bytes(&bytes[..cut], &descriptor, DecodeOptions::default())
                .unwrap_err();
            assert!(
                matches!(err, DecodeError::UnexpectedEndOfBuffer { .. }),
                "cut at {}: {:?}",
                cut,
                err
            );
        }
    }

    #[test]
    fn test_sequence_of_two_records() {
        let descriptor = TypeDescriptor::builder("holder")
            .sequence("currencies", currency())
            .build();
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0xEA, 0x30, 0x55]);
        bytes.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0, 0]);

        let record = decode_record_bytes(&bytes, &descriptor, DecodeOptions::strict()).unwrap();
        let items = record.get("currencies").and_then(Value::as_sequence).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], currency_value(4, "eosio"));
        assert_eq!(items[1], currency_value(2, ""));
    }

    #[test]
    fn test_sequence_of_empty_records_capped() {
        let producer_change = TypeDescriptor::builder("producer_change").build_shared();
        let descriptor = TypeDescriptor::builder("block")
            .sequence("producer_changes", producer_change)
            .build();

        let record = decode_record_bytes(&[3], &descriptor, DecodeOptions::strict()).unwrap();
        let items = record.get("producer_changes").and_then(Value::as_sequence).unwrap();
        assert_eq!(items.len(), 3);

        let row = hex::decode("80e1eb17").unwrap();
        let err = decode_record_bytes(&row, &descriptor, DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SequenceTooLong { count: 50_000_000, offset: 0, .. }
        ));
    }

    #[test]
    fn test_sequence_count_beyond_input_fails_early() {
        let descriptor = TypeDescriptor::builder("holder")
            .sequence("currencies", currency())
            .build();
        // two 9-byte currencies declared, one present
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0xEA, 0x30, 0x55]);
        let err = decode_record_bytes(&bytes, &descriptor, DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfBuffer { offset: 1, needed: 18, remaining: 9, .. }
        ));
    }

    #[test]
    fn test_opaque_field_unsupported() {
        let descriptor = TypeDescriptor::builder("block")
            .field("block_num", PrimitiveKind::U32)
            .sequence("timestamps", FieldKind::Opaque("JSONTime"))
            .build();
        let bytes = [1, 0, 0, 0, 0];
        let err = decode_record_bytes(&bytes, &descriptor, DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedFieldKind {
                field: "timestamps".to_string(),
                kind: "JSONTime"
            }
        );

        let mut reader = Reader::new(&bytes);
        assert!(decode_record(&mut reader, &descriptor).is_err());
        assert_eq!(reader.position(), 0, "nothing read for an unsupported descriptor");
    }

    #[test]
    fn test_mismatched_descriptor_runs_off_end() {
        let row = hex::decode("0100000000000000").unwrap();
        let narrow = TypeDescriptor::builder("narrow").field("v", PrimitiveKind::U64).build();
        let wide = TypeDescriptor::builder("wide")
            .field("v", PrimitiveKind::U64)
            .field("w", PrimitiveKind::U32)
            .build();

        let record = decode_record_bytes(&row, &narrow, DecodeOptions::default()).unwrap();
        assert_eq!(record.get("v"), Some(&Value::U64(1)));

        let err = decode_record_bytes(&row, &wide, DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfBuffer { context: "uint32", offset: 8, .. }
        ));
    }
}
