//! Fixed-length digests and variable-length byte blobs.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ParseError;

/// A fixed-length digest, stored with no length prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum<const N: usize>(pub [u8; N]);

/// 20-byte digest (ripemd160 sized).
pub type Checksum160 = Checksum<20>;

/// 32-byte digest: block ids, chain ids, node ids, transaction ids.
pub type Checksum256 = Checksum<32>;

/// 64-byte digest.
pub type Checksum512 = Checksum<64>;

impl<const N: usize> Checksum<N> {
    pub const LEN: usize = N;

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl Checksum256 {
    /// SHA-256 of `data`, e.g. a transaction id from its packed bytes.
    pub fn hash(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Self(out)
    }

    /// Block number embedded in the first four bytes of a block id.
    pub fn block_num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl<const N: usize> Default for Checksum<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for Checksum<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Display for Checksum<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl<const N: usize> fmt::Debug for Checksum<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum{}({})", N * 8, self)
    }
}

impl<const N: usize> FromStr for Checksum<N> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let actual = bytes.len();
        let array = <[u8; N]>::try_from(bytes)
            .map_err(|_| ParseError::ChecksumLength { expected: N, actual })?;
        Ok(Self(array))
    }
}

impl<const N: usize> Serialize for Checksum<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const N: usize> Deserialize<'de> for Checksum<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Variable-length bytes: varint length + raw bytes on the wire, hex in JSON.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({})", self)
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        hex::decode(s.as_ref()).map(Self).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let digest = Checksum256::hash(b"abc");
        assert_eq!(
            digest.to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_parse_and_length_check() {
        let id: Checksum256 = "0000007b677719bdd76d729c3ac36bed5790d5548aadc26804489e5e179f4a5b"
            .parse()
            .unwrap();
        assert_eq!(id.block_num(), 123);

        let err = "00ff".parse::<Checksum256>().unwrap_err();
        assert_eq!(err, ParseError::ChecksumLength { expected: 32, actual: 2 });
        assert!("zz".parse::<Checksum160>().is_err());
    }

    #[test]
    fn test_serde_hex() {
        let bytes = HexBytes(vec![0xDE, 0xAD]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "\"dead\"");
        let back: HexBytes = serde_json::from_str("\"DEAD\"").unwrap();
        assert_eq!(back, bytes);

        let zero = Checksum512::default();
        assert!(zero.is_zero());
        let json = serde_json::to_string(&zero).unwrap();
        assert_eq!(json.len(), 64 * 2 + 2);
        assert_eq!(serde_json::from_str::<Checksum512>(&json).unwrap(), zero);
    }
}
