//! Data model types for EOS wire data.
//!
//! - Domain primitives (names, keys, signatures, assets, digests)
//! - Type descriptors and the dynamic records they decode into
//! - Typed messages and response envelopes

pub mod asset;
pub mod checksum;
pub mod descriptor;
pub mod handshake;
pub mod key;
pub mod name;
pub mod response;
pub mod value;

pub use asset::{Asset, Symbol};
pub use checksum::{Checksum, Checksum160, Checksum256, Checksum512, HexBytes};
pub use descriptor::{
    DomainKind, FieldDescriptor, FieldKind, PrimitiveKind, TypeDescriptor, TypeDescriptorBuilder,
};
pub use handshake::HandshakeMessage;
pub use key::{CurveType, PublicKey, Signature};
pub use name::Name;
pub use response::{GetTableRowsResponse, RowFormat};
pub use value::{Record, Value, VarUint32, VarUint64, WireString};
