use crate::description::MaterialDescription;

/// AES key length in bytes (256 bits). Default content key size.
pub const AES_KEY_LENGTH: usize = 32;

/// Wrapping transform name for RFC 3394 AES key wrap.
pub const AES_WRAP_ALGORITHM: &str = "AESWrap";

/// Wrapping transform name for RSA OAEP with SHA-256.
pub const RSA_OAEP_WRAP_ALGORITHM: &str = "RSA/ECB/OAEPWithSHA-256AndMGF1Padding";

/// Whether a key participates in symmetric or asymmetric operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Symmetric,
    Asymmetric,
}

/// Identifies the logical record a materials request is for.
///
/// Opaque to the materials core: providers receive it untouched and decide
/// what (if anything) to bind to it. On the decryption path it carries the
/// material description loaded from the stored record.
#[derive(Debug, Clone, Default)]
pub struct EncryptionContext {
    /// Table or namespace the record lives in.
    pub table_name: String,
    /// Primary key of the record within the table.
    pub record_id: String,
    /// Material description persisted alongside the record.
    pub material_description: MaterialDescription,
}
