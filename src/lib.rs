//! Envelope key materials for client-side field-level encryption.
//!
//! Each record gets an ephemeral content key, wrapped under a long-lived
//! delegated key and stored (base64-encoded, with its algorithm metadata) in
//! a portable material description that travels with the encrypted record.
//! A future reader with the matching unwrapping key rebuilds byte-identical
//! key material from that description alone.
//!
//! The crate does not encrypt record bytes and does not talk to any store or
//! remote key service; it only manages the content key's lifecycle and its
//! wrapped representation.

pub mod delegated;
pub mod description;
pub mod error;
pub mod local;
pub mod materials;
pub mod provider;
pub mod types;
pub mod wrapped;

pub use delegated::{ContentKey, DelegatedKey};
pub use description::{
    MaterialDescription, CONTENT_ENCRYPTION_ALGORITHM, CONTENT_KEY_WRAPPING_ALGORITHM,
    WRAPPED_CONTENT_KEY,
};
pub use error::MaterialsError;
pub use local::LocalDelegatedKey;
pub use materials::CryptographicMaterials;
pub use provider::{
    CryptographicMaterialsProvider, StaticMaterialsProvider, WrappedMaterialsProvider,
};
pub use types::{
    EncryptionContext, KeyKind, AES_KEY_LENGTH, AES_WRAP_ALGORITHM, RSA_OAEP_WRAP_ALGORITHM,
};
pub use wrapped::{WrappedCryptographicMaterials, DEFAULT_CONTENT_ENCRYPTION_ALGORITHM};
