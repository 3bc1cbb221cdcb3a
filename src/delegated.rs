//! Delegated key capability and raw content keys.
//!
//! A delegated key is an opaque, externally owned capability that performs
//! cryptographic primitives on behalf of the materials layer. Every method
//! except `algorithm` defaults to a distinguishable "unsupported" error so a
//! key can implement exactly the capabilities it has (a public RSA wrapping
//! key cannot unwrap, a MAC key cannot wrap at all).

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::MaterialsError;
use crate::types::{KeyKind, AES_KEY_LENGTH};

/// Cryptographic capability used for wrapping, unwrapping, signing, and
/// verification. Shared, long-lived, and never mutated by this crate.
pub trait DelegatedKey: Send + Sync {
    /// Native algorithm identifier of this key (e.g. `AES`, `HmacSHA256`).
    fn algorithm(&self) -> &str;

    /// Wrap raw content key bytes under this key with the named transform.
    fn wrap_key(
        &self,
        wrapping_algorithm: &str,
        content_key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>, MaterialsError> {
        let _ = (wrapping_algorithm, content_key, aad);
        Err(MaterialsError::UnsupportedOperation(
            "this delegated key cannot wrap content keys",
        ))
    }

    /// Unwrap a wrapped content key.
    ///
    /// `expected_algorithm` is the cipher family the recovered key is for;
    /// the returned [`ContentKey`] is tagged with it.
    fn unwrap_key(
        &self,
        wrapping_algorithm: &str,
        wrapped_key: &[u8],
        expected_algorithm: &str,
        kind: KeyKind,
        aad: Option<&[u8]>,
    ) -> Result<ContentKey, MaterialsError> {
        let _ = (wrapping_algorithm, wrapped_key, expected_algorithm, kind, aad);
        Err(MaterialsError::UnsupportedOperation(
            "this delegated key cannot unwrap content keys",
        ))
    }

    /// Compute a signature (or MAC) over `data`.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, MaterialsError> {
        let _ = data;
        Err(MaterialsError::UnsupportedOperation(
            "this delegated key cannot sign",
        ))
    }

    /// Verify a signature (or MAC) over `data`.
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<(), MaterialsError> {
        let _ = (data, signature);
        Err(MaterialsError::UnsupportedOperation(
            "this delegated key cannot verify",
        ))
    }
}

/// Raw symmetric key material plus the algorithm family it belongs to.
///
/// This is what the attribute encryption pipeline consumes. Key bytes are
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey {
    #[zeroize(skip)]
    algorithm: String,
    bytes: Vec<u8>,
}

impl ContentKey {
    pub fn new(algorithm: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            bytes,
        }
    }

    /// Generate a fresh random key for `algorithm`.
    ///
    /// `key_length` is in bytes. When absent, the family default applies:
    /// 32 bytes (256 bits) for `AES` and `HmacSHA256`. AES keys are
    /// restricted to 16, 24, or 32 bytes; any other family requires an
    /// explicit length.
    pub fn generate(
        algorithm: &str,
        key_length: Option<usize>,
    ) -> Result<Self, MaterialsError> {
        let length = match (algorithm, key_length) {
            ("AES", Some(len)) if len == 16 || len == 24 || len == 32 => len,
            ("AES", Some(len)) => {
                return Err(MaterialsError::InvalidAlgorithm(format!(
                    "AES keys must be 128, 192, or 256 bits, got {}",
                    len * 8
                )))
            }
            ("AES", None) | ("HmacSHA256", None) => AES_KEY_LENGTH,
            (_, Some(len)) if len > 0 => len,
            (other, _) => {
                return Err(MaterialsError::InvalidAlgorithm(format!(
                    "cannot pick a default key length for {other}"
                )))
            }
        };

        let mut bytes = vec![0u8; length];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| MaterialsError::Rng(e.to_string()))?;
        Ok(Self {
            algorithm: algorithm.to_owned(),
            bytes,
        })
    }

    #[inline]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Returns the raw key bytes.
    ///
    /// Use with caution - the returned slice is not zeroized automatically.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
