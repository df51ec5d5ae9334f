//! Public keys and signatures as they appear on the wire.
//!
//! Both carry a one-byte curve tag followed by fixed-length material. The
//! tag is kept verbatim; interpreting it is left to whoever verifies keys.

use std::fmt;

use crate::limits::{PUBLIC_KEY_DATA_LEN, SIGNATURE_DATA_LEN};

/// Known curve tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CurveType {
    K1 = 0,
    R1 = 1,
}

impl CurveType {
    /// Creates a CurveType from its wire tag.
    pub fn from_u8(v: u8) -> Option<CurveType> {
        match v {
            0 => Some(CurveType::K1),
            1 => Some(CurveType::R1),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            CurveType::K1 => "K1",
            CurveType::R1 => "R1",
        }
    }
}

/// A public key: curve tag + 33 bytes of compressed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub curve: u8,
    pub data: [u8; PUBLIC_KEY_DATA_LEN],
}

impl PublicKey {
    pub fn new(curve: CurveType, data: [u8; PUBLIC_KEY_DATA_LEN]) -> Self {
        Self {
            curve: curve as u8,
            data,
        }
    }

    /// Returns the curve, or `None` for a tag this crate doesn't know.
    pub fn curve_type(&self) -> Option<CurveType> {
        CurveType::from_u8(self.curve)
    }

    /// An all-zero key, as sent by peers that have no key.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }
}

impl Default for PublicKey {
    fn default() -> Self {
        Self {
            curve: CurveType::K1 as u8,
            data: [0u8; PUBLIC_KEY_DATA_LEN],
        }
    }
}

/// A signature: curve tag + 65 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub curve: u8,
    pub data: [u8; SIGNATURE_DATA_LEN],
}

impl Signature {
    pub fn new(curve: CurveType, data: [u8; SIGNATURE_DATA_LEN]) -> Self {
        Self {
            curve: curve as u8,
            data,
        }
    }

    /// Returns the curve, or `None` for a tag this crate doesn't know.
    pub fn curve_type(&self) -> Option<CurveType> {
        CurveType::from_u8(self.curve)
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            curve: CurveType::K1 as u8,
            data: [0u8; SIGNATURE_DATA_LEN],
        }
    }
}

fn fmt_tagged(f: &mut fmt::Formatter<'_>, kind: &str, curve: u8, data: &[u8]) -> fmt::Result {
    match CurveType::from_u8(curve) {
        Some(c) => write!(f, "{}_{}_{}", kind, c.prefix(), hex::encode(data)),
        None => write!(f, "{}_#{}_{}", kind, curve, hex::encode(data)),
    }
}

/// Hex display (`PUB_K1_<hex>`); base58 rendering belongs to key tooling.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tagged(f, "PUB", self.curve, &self.data)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tagged(f, "SIG", self.curve, &self.data)
    }
}
