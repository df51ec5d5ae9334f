//! Peer handshake message.

use crate::binary_struct;
use crate::model::{Checksum256, PublicKey, Signature};

binary_struct! {
    /// First message a peer sends on a new connection.
    ///
    /// `key` and `signature` are all zeros when the peer has no key to
    /// prove; `token` is the digest of `time` that `signature` signs.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct HandshakeMessage {
        pub network_version: i16,
        pub chain_id: Checksum256,
        pub node_id: Checksum256,
        pub key: PublicKey,
        pub time: i64,
        pub token: Checksum256,
        pub signature: Signature,
        pub p2p_address: String,
        pub last_irreversible_block_num: u32,
        pub last_irreversible_block_id: Checksum256,
        pub head_num: u32,
        pub head_id: Checksum256,
        pub os: String,
        pub agent: String,
        pub generation: i16,
    }
}

impl HandshakeMessage {
    /// Whether the peer proved ownership of a key.
    pub fn is_signed(&self) -> bool {
        !self.key.is_empty() && !self.signature.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_bytes, Encode};
    use crate::model::{CurveType, DomainKind, FieldKind, PrimitiveKind};
    use crate::DecodeError;

    fn sample() -> HandshakeMessage {
        HandshakeMessage {
            network_version: 1206,
            chain_id: Checksum256::hash(b"chain"),
            node_id: Checksum256::hash(b"node"),
            key: PublicKey::new(CurveType::K1, [2; 33]),
            time: 1_517_545_172_000_000,
            token: Checksum256::hash(b"time"),
            signature: Signature::new(CurveType::K1, [9; 65]),
            p2p_address: "peer.example:9876 - 1a2b3c".to_string(),
            last_irreversible_block_num: 2_465_655,
            last_irreversible_block_id: Checksum256::default(),
            head_num: 2_465_669,
            head_id: Checksum256::hash(b"head"),
            os: "linux".to_string(),
            agent: "\"EOS Test Agent\"".to_string(),
            generation: 1,
        }
    }

    #[test]
    fn test_roundtrip() {
        let msg = sample();
        let bytes = msg.to_bytes();
        assert_eq!(decode_bytes::<HandshakeMessage>(&bytes).unwrap(), msg);
        assert!(msg.is_signed());
        assert!(!HandshakeMessage::default().is_signed());
    }

    #[test]
    fn test_truncated_reports_field() {
        let bytes = sample().to_bytes();
        // network_version + chain_id + half of node_id
        let err = decode_bytes::<HandshakeMessage>(&bytes[..2 + 32 + 16]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfBuffer { context: "node_id", offset: 34, needed: 32, remaining: 16 }
        ));
    }

    #[test]
    fn test_descriptor_matches_fields() {
        let descriptor = HandshakeMessage::descriptor();
        assert_eq!(descriptor.name(), "HandshakeMessage");
        assert_eq!(descriptor.fields().len(), 15);
        assert_eq!(descriptor.fields()[0].kind(), &FieldKind::Primitive(PrimitiveKind::I16));
        assert_eq!(
            descriptor.field("chain_id").unwrap().kind(),
            &FieldKind::Domain(DomainKind::Checksum(32))
        );
        assert_eq!(
            descriptor.field("signature").unwrap().kind(),
            &FieldKind::Domain(DomainKind::Signature)
        );
        assert!(std::sync::Arc::ptr_eq(&descriptor, &HandshakeMessage::descriptor()));
    }
}
