//! Hex-encoded row blobs.

use crate::error::DecodeError;

/// Decodes one hex row into bytes.
///
/// Accepts upper- and lowercase digits. Odd lengths and non-hex characters
/// fail with [`DecodeError::MalformedHex`].
pub fn decode_hex(row: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(hex::decode(row)?)
}

/// Encodes bytes as a lowercase hex row.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
