//! Binary decoding and encoding of EOS wire data.
//!
//! Rows arrive as hex strings ([`blob`]), are read through a bounds-checked
//! [`Reader`] and decoded either into Rust types implementing [`Decode`]
//! or, given a [`TypeDescriptor`](crate::model::TypeDescriptor), into a
//! dynamic [`Record`](crate::model::Record) ([`structural`]).

pub mod blob;
pub mod domain;
pub mod primitives;
pub mod rows;
pub mod structural;
pub mod traits;

pub use blob::{decode_hex, encode_hex};
pub use primitives::{DecodeOptions, Reader, Writer};
pub use rows::{
    decode_record_rows, decode_record_rows_with_options, decode_row, decode_row_with_options,
    decode_rows, decode_rows_with_options,
};
pub use structural::{check_descriptor, decode_record, decode_record_bytes, encode_record, encode_value};
pub use traits::{decode_bytes, decode_bytes_with_options, Decode, Describe, Encode};
