//! Error types for EOS binary decoding and encoding.

use thiserror::Error;

/// Error codes grouping [`DecodeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Malformed hex in a row string
    MalformedHex,
    /// E002: Read past the end of the row buffer
    UnexpectedEndOfBuffer,
    /// E003: Target type has a field the engine cannot decode
    UnsupportedFieldKind,
    /// E004: Malformed varint/bool or unconsumed bytes
    MalformedEncoding,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MalformedHex => "E001",
            ErrorCode::UnexpectedEndOfBuffer => "E002",
            ErrorCode::UnsupportedFieldKind => "E003",
            ErrorCode::MalformedEncoding => "E004",
        }
    }
}

/// Error while decoding a single row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001 ===
    #[error("[E001] malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    // === E002 ===
    #[error(
        "[E002] unexpected end of buffer while reading {context} at offset {offset}: \
         needed {needed} bytes, {remaining} remaining"
    )]
    UnexpectedEndOfBuffer {
        context: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    // === E003 ===
    #[error("[E003] field `{field}` has unsupported kind `{kind}`")]
    UnsupportedFieldKind { field: String, kind: &'static str },

    // === E004 ===
    #[error("[E004] varint at offset {offset} exceeds maximum length (10 bytes)")]
    VarintTooLong { offset: usize },

    #[error("[E004] varint at offset {offset} overflows u64")]
    VarintOverflow { offset: usize },

    #[error("[E004] varint value {value} at offset {offset} does not fit in {target}")]
    VarintOutOfRange {
        value: u64,
        offset: usize,
        target: &'static str,
    },

    #[error(
        "[E004] sequence at offset {offset} declares {count} zero-width elements \
         (limit {max})"
    )]
    SequenceTooLong { count: u64, offset: usize, max: usize },

    #[error("[E004] invalid bool value {value:#04x} at offset {offset} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8, offset: usize },

    #[error("[E004] {remaining} trailing bytes after decoding {type_name}")]
    TrailingBytes {
        type_name: &'static str,
        remaining: usize,
    },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::MalformedHex(_) => ErrorCode::MalformedHex,
            DecodeError::UnexpectedEndOfBuffer { .. } => ErrorCode::UnexpectedEndOfBuffer,
            DecodeError::UnsupportedFieldKind { .. } => ErrorCode::UnsupportedFieldKind,
            _ => ErrorCode::MalformedEncoding,
        }
    }

    /// Returns the byte offset the error was detected at, when known.
    ///
    /// For malformed hex this is the byte the bad digit would have landed in.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedHex(hex::FromHexError::InvalidHexCharacter { index, .. }) => {
                Some(index / 2)
            }
            DecodeError::UnexpectedEndOfBuffer { offset, .. }
            | DecodeError::VarintTooLong { offset }
            | DecodeError::VarintOverflow { offset }
            | DecodeError::VarintOutOfRange { offset, .. }
            | DecodeError::SequenceTooLong { offset, .. }
            | DecodeError::InvalidBool { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// A row of a batch failed to decode. The whole batch is discarded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: {source}")]
pub struct RowError {
    /// Index of the failing row in the input array.
    pub row: usize,
    #[source]
    pub source: DecodeError,
}

/// Error while decoding the `rows` payload of a table-rows response.
#[derive(Debug, Error)]
pub enum RowsError {
    /// `rows` did not have the JSON shape the requested format expects.
    #[error("rows payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Row(#[from] RowError),
}

/// Error while putting a value on the wire.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("symbol code {code:?} must be 1 to {max} uppercase ASCII letters")]
    InvalidSymbolCode { code: String, max: usize },

    #[error("name {name:?} is not a valid account name")]
    InvalidName { name: String },
}

/// Error while parsing the text form of a domain value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid asset {input:?}: {reason}")]
    InvalidAsset { input: String, reason: &'static str },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("checksum length {actual} doesn't match expected {expected}")]
    ChecksumLength { expected: usize, actual: usize },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
