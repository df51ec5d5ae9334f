//! Batches of hex rows.
//!
//! A batch is all-or-nothing: rows are decoded into a staging buffer that
//! is appended to the caller's collection only once every row succeeded.
//! On failure the collection is exactly as it was before the call.

use tracing::debug;

use crate::codec::blob::decode_hex;
use crate::codec::primitives::DecodeOptions;
use crate::codec::structural::{check_descriptor, decode_record_checked};
use crate::codec::traits::{decode_bytes_with_options, Decode};
use crate::error::{DecodeError, RowError};
use crate::model::{Record, TypeDescriptor};

/// Decodes one hex row as `T`.
pub fn decode_row<T: Decode>(row: &str) -> Result<T, DecodeError> {
    decode_row_with_options(row, DecodeOptions::default())
}

/// Decodes one hex row as `T` with explicit options.
pub fn decode_row_with_options<T: Decode>(row: &str, options: DecodeOptions) -> Result<T, DecodeError> {
    let bytes = decode_hex(row)?;
    decode_bytes_with_options(&bytes, options)
}

/// Decodes every hex row as `T` and appends them to `out`, in order.
///
/// ```rust
/// let mut balances: Vec<u64> = Vec::new();
/// eos_binary::decode_rows(&["0100000000000000", "0200000000000000"], &mut balances).unwrap();
/// assert_eq!(balances, [1, 2]);
///
/// let err = eos_binary::decode_rows(&["0300000000000000", "04"], &mut balances).unwrap_err();
/// assert_eq!(err.row, 1);
/// assert_eq!(balances, [1, 2]);
/// ```
pub fn decode_rows<T, S>(rows: &[S], out: &mut Vec<T>) -> Result<(), RowError>
where
    T: Decode,
    S: AsRef<str>,
{
    decode_rows_with_options(rows, DecodeOptions::default(), out)
}

/// [`decode_rows`] with explicit options.
pub fn decode_rows_with_options<T, S>(
    rows: &[S],
    options: DecodeOptions,
    out: &mut Vec<T>,
) -> Result<(), RowError>
where
    T: Decode,
    S: AsRef<str>,
{
    decode_batch(rows, out, |bytes| decode_bytes_with_options(bytes, options))
}

/// Decodes every hex row as a record described by `descriptor` and appends
/// them to `out`, in order.
///
/// An unsupported descriptor fails before any row is read; the error is
/// reported against row 0.
pub fn decode_record_rows<S: AsRef<str>>(
    rows: &[S],
    descriptor: &TypeDescriptor,
    out: &mut Vec<Record>,
) -> Result<(), RowError> {
    decode_record_rows_with_options(rows, descriptor, DecodeOptions::default(), out)
}

/// [`decode_record_rows`] with explicit options.
pub fn decode_record_rows_with_options<S: AsRef<str>>(
    rows: &[S],
    descriptor: &TypeDescriptor,
    options: DecodeOptions,
    out: &mut Vec<Record>,
) -> Result<(), RowError> {
    if !rows.is_empty() {
        check_descriptor(descriptor).map_err(|source| RowError { row: 0, source })?;
    }
    decode_batch(rows, out, |bytes| decode_record_checked(bytes, descriptor, options))
}

fn decode_batch<T, S, F>(rows: &[S], out: &mut Vec<T>, mut decode_one: F) -> Result<(), RowError>
where
    S: AsRef<str>,
    F: FnMut(&[u8]) -> Result<T, DecodeError>,
{
    debug!(rows = rows.len(), "decoding binary rows");

    let mut staged = Vec::with_capacity(rows.len());
    for (row, hex) in rows.iter().enumerate() {
        let decoded = decode_hex(hex.as_ref())
            .and_then(|bytes| decode_one(&bytes))
            .map_err(|source| {
                debug!(row, offset = source.offset(), error = %source, "row failed to decode");
                RowError { row, source }
            })?;
        staged.push(decoded);
    }

    out.append(&mut staged);
    debug!(rows = rows.len(), total = out.len(), "decoded binary rows");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrimitiveKind, Value};

    #[test]
    fn test_order_preserved() {
        let rows = ["0100000000000000", "0300000000000000", "0200000000000000"];
        let mut out: Vec<u64> = vec![9];
        decode_rows(&rows, &mut out).unwrap();
        assert_eq!(out, [9, 1, 3, 2]);
    }

    #[test]
    fn test_all_or_nothing() {
        let rows = vec![
            "0100000000000000".to_string(),
            "0200000000000000".to_string(),
            "02000000".to_string(),
            "0400000000000000".to_string(),
        ];
        let mut out: Vec<u64> = vec![7, 8];
        let err = decode_rows(&rows, &mut out).unwrap_err();
        assert_eq!(err.row, 2);
        assert!(matches!(err.source, DecodeError::UnexpectedEndOfBuffer { offset: 0, .. }));
        assert_eq!(out, [7, 8]);
    }

    #[test]
    fn test_malformed_hex_reports_row() {
        let mut out: Vec<u8> = Vec::new();
        let err = decode_rows(&["01", "0x"], &mut out).unwrap_err();
        assert_eq!(err.row, 1);
        assert!(matches!(err.source, DecodeError::MalformedHex(_)));
        assert!(out.is_empty());
        assert!(err.to_string().starts_with("row 1: [E001]"));
    }

    #[test]
    fn test_strict_options_reject_trailing() {
        let rows = ["010000000000000000"];
        let mut out: Vec<u64> = Vec::new();
        decode_rows(&rows, &mut out).unwrap();
        assert_eq!(out, [1]);

        let err = decode_rows_with_options(&rows, DecodeOptions::strict(), &mut out).unwrap_err();
        assert!(matches!(err.source, DecodeError::TrailingBytes { remaining: 1, .. }));
        assert_eq!(out, [1]);
    }

    #[test]
    fn test_record_rows() {
        let descriptor = TypeDescriptor::builder("balance")
            .field("amount", PrimitiveKind::U64)
            .build();
        let mut out = Vec::new();
        decode_record_rows(&["0100000000000000", "0500000000000000"], &descriptor, &mut out).unwrap();
        let amounts: Vec<_> = out.iter().map(|r| r.get("amount").cloned()).collect();
        assert_eq!(amounts, [Some(Value::U64(1)), Some(Value::U64(5))]);
    }

    #[test]
    fn test_empty_batch() {
        let rows: [&str; 0] = [];
        let mut out: Vec<u32> = Vec::new();
        decode_rows(&rows, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_row() {
        assert_eq!(decode_row::<u64>("0100000000000000").unwrap(), 1);
        assert!(matches!(
            decode_row::<u64>("01"),
            Err(DecodeError::UnexpectedEndOfBuffer { .. })
        ));
    }
}
