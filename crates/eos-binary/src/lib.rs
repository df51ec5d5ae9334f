//! Type-directed decoder for EOS node binary data.
//!
//! A node renders table rows and transaction payloads as hex strings of
//! their packed binary form. Only the caller knows the shape of a row, so
//! the decoder is driven by the target type: either a Rust type declared
//! with [`binary_struct!`] (or any type implementing [`Decode`]), or a
//! runtime [`TypeDescriptor`].
//!
//! # Quick Start
//!
//! ```rust
//! use eos_binary::{binary_struct, decode_rows, Asset};
//!
//! binary_struct! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct AccountRow {
//!         pub balance: Asset,
//!     }
//! }
//!
//! let mut rows: Vec<AccountRow> = Vec::new();
//! decode_rows(&["010000000000000004535958000000"], &mut rows).unwrap();
//! assert_eq!(rows[0].balance.to_string(), "0.0001 SYX");
//! ```
//!
//! # Wire Format
//!
//! Fields are packed back to back in declaration order with no padding:
//! little-endian integers, one-byte bools, varint-prefixed strings, bytes
//! and sequences, and fixed layouts for the domain primitives in
//! [`model`].
//!
//! # Security
//!
//! Rows are untrusted input:
//! - Every read is bounds-checked and never advances past the buffer
//! - Varints are limited to 10 bytes and checked for overflow
//! - Sequence counts the remaining input can't hold fail before any element
//!   is read, and sequences of zero-width elements are capped
//! - A failing batch leaves the caller's collection untouched

mod macros;

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

#[doc(hidden)]
pub mod __private {
    pub use lazy_static::lazy_static;
}

// Re-export commonly used types at crate root
pub use codec::{
    decode_record_rows, decode_row, decode_rows, decode_rows_with_options, Decode, DecodeOptions,
    Describe, Encode,
};
pub use error::{DecodeError, EncodeError, ErrorCode, ParseError, RowError, RowsError};
pub use model::{
    Asset, Checksum160, Checksum256, Checksum512, CurveType, FieldKind, GetTableRowsResponse,
    HandshakeMessage, HexBytes, Name, PublicKey, Record, RowFormat, Signature, Symbol,
    TypeDescriptor, Value,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
