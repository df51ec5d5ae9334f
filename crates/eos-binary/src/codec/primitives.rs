//! Primitive encoding/decoding for the EOS binary format.
//!
//! Fixed-width little-endian integers, booleans, LEB128 varints and
//! varint-prefixed byte strings.

use crate::error::DecodeError;
use crate::limits::{MAX_SEQUENCE_LEN, MAX_VARINT_BYTES};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options controlling how permissive decoding is.
///
/// The defaults accept everything the node is known to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject bool bytes other than `0x00`/`0x01` instead of treating any
    /// nonzero byte as `true`.
    pub strict_bool: bool,
    /// Fail a row that leaves bytes unread after its target type is decoded.
    pub reject_trailing_bytes: bool,
}

impl DecodeOptions {
    /// Creates the default (permissive) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject anything a well-behaved producer wouldn't emit.
    pub fn strict() -> Self {
        Self {
            strict_bool: true,
            reject_trailing_bytes: true,
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Forward-only cursor over one row's bytes.
///
/// Every read either advances by exactly the bytes it consumed or fails
/// with the position unchanged.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    options: DecodeOptions,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    /// Creates a new reader with explicit decode options.
    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            options,
        }
    }

    /// Returns the options this reader was created with.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn end_of_buffer(&self, context: &'static str, needed: usize) -> DecodeError {
        DecodeError::UnexpectedEndOfBuffer {
            context,
            offset: self.pos,
            needed,
            remaining: self.remaining_len(),
        }
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.end_of_buffer(context, 1))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(self.end_of_buffer(context, n));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        self.read_array(context).map(u16::from_le_bytes)
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.read_array(context).map(u32::from_le_bytes)
    }

    /// Reads a little-endian u64.
    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        self.read_array(context).map(u64::from_le_bytes)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self, context: &'static str) -> Result<i8, DecodeError> {
        self.read_array(context).map(i8::from_le_bytes)
    }

    /// Reads a little-endian i16.
    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        self.read_array(context).map(i16::from_le_bytes)
    }

    /// Reads a little-endian i32.
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        self.read_array(context).map(i32::from_le_bytes)
    }

    /// Reads a little-endian i64.
    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        self.read_array(context).map(i64::from_le_bytes)
    }

    /// Reads a one-byte bool.
    ///
    /// Any nonzero byte is `true` unless [`DecodeOptions::strict_bool`] is set.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        let offset = self.pos;
        let byte = self.read_byte(context)?;
        match byte {
            0x00 => Ok(false),
            0x01 => Ok(true),
            _ if self.options.strict_bool => {
                self.pos = offset;
                Err(DecodeError::InvalidBool { value: byte, offset })
            }
            _ => Ok(true),
        }
    }

    /// Reads an unsigned varint (LEB128).
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let start = self.pos;
        let mut result: u64 = 0;

        for i in 0..MAX_VARINT_BYTES {
            let Some(&byte) = self.data.get(start + i) else {
                return Err(self.end_of_buffer(context, i + 1));
            };
            let value = (byte & 0x7F) as u64;

            // The tenth byte only has room for the top bit of a u64.
            if i == MAX_VARINT_BYTES - 1 && value > 1 {
                return Err(DecodeError::VarintOverflow { offset: start });
            }

            result |= value << (7 * i);

            if byte & 0x80 == 0 {
                self.pos = start + i + 1;
                return Ok(result);
            }
        }

        Err(DecodeError::VarintTooLong { offset: start })
    }

    /// Reads a varint that must fit in 32 bits.
    pub fn read_varuint32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let start = self.pos;
        let value = self.read_varint(context)?;
        u32::try_from(value).map_err(|_| {
            self.pos = start;
            DecodeError::VarintOutOfRange {
                value,
                offset: start,
                target: "u32",
            }
        })
    }

    /// Reads a sequence count for elements at least `min_width` bytes wide.
    ///
    /// A count the remaining input can't hold fails here, before any element
    /// is decoded. Zero-width elements are capped at [`MAX_SEQUENCE_LEN`].
    pub fn read_sequence_len(&mut self, min_width: usize, context: &'static str) -> Result<usize, DecodeError> {
        let start = self.pos;
        let count = self.read_varint(context)?;

        if min_width == 0 {
            if count > MAX_SEQUENCE_LEN as u64 {
                self.pos = start;
                return Err(DecodeError::SequenceTooLong {
                    count,
                    offset: start,
                    max: MAX_SEQUENCE_LEN,
                });
            }
            return Ok(count as usize);
        }

        let fits = self.remaining_len() / min_width;
        match usize::try_from(count) {
            Ok(count) if count <= fits => Ok(count),
            _ => {
                let needed = usize::try_from(count)
                    .unwrap_or(usize::MAX)
                    .saturating_mul(min_width);
                let err = self.end_of_buffer(context, needed);
                self.pos = start;
                Err(err)
            }
        }
    }

    /// Reads a varint length followed by that many bytes, borrowed.
    pub fn read_bytes_prefixed_ref(&mut self, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        let len = self.read_varint(context)?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.read_bytes(len, context).inspect_err(|_| self.pos = start)
    }

    /// Reads a varint length followed by that many bytes.
    pub fn read_bytes_prefixed(&mut self, context: &'static str) -> Result<Vec<u8>, DecodeError> {
        self.read_bytes_prefixed_ref(context).map(<[u8]>::to_vec)
    }

    /// Reads a length-prefixed string.
    ///
    /// The wire format doesn't validate text; invalid UTF-8 sequences are
    /// replaced with U+FFFD rather than rejected. Use
    /// [`WireString`](crate::model::WireString) to keep the exact bytes.
    pub fn read_string(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let bytes = self.read_bytes_prefixed_ref(context)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Checks that a row was fully consumed, if the options require it.
    pub fn finish(&self, type_name: &'static str) -> Result<(), DecodeError> {
        if self.options.reject_trailing_bytes && !self.is_empty() {
            return Err(DecodeError::TrailingBytes {
                type_name,
                remaining: self.remaining_len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(value as u8);
    }

    /// Writes an unsigned varint (LEB128).
    #[inline]
    pub fn write_varint(&mut self, mut value: u64) {
        // Use stack buffer to batch writes (faster than multiple push calls)
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes_prefixed(s.as_bytes());
    }

    /// Writes a length-prefixed byte array.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }
}
