//! Decoding limits.

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_BYTES: usize = 10;

/// Upper bound on elements preallocated for a sequence before any element
/// has been read. Counts come straight off the wire; the vector still grows
/// past this if the row really holds that many elements.
pub const MAX_PREALLOC_ELEMENTS: usize = 4096;

/// Maximum count for a sequence whose elements occupy no bytes. Such a
/// sequence can't run out of input, so its count is the only bound.
pub const MAX_SEQUENCE_LEN: usize = 65_536;

/// Maximum length of an asset symbol code.
pub const MAX_SYMBOL_CODE_LEN: usize = 6;

/// Width of the asset symbol field (precision byte + code bytes).
pub const SYMBOL_WIDTH: usize = 1 + MAX_SYMBOL_CODE_LEN;

/// Width of public key material, excluding the curve tag.
pub const PUBLIC_KEY_DATA_LEN: usize = 33;

/// Width of signature material, excluding the curve tag.
pub const SIGNATURE_DATA_LEN: usize = 65;
