//! Local delegated keys backed by raw symmetric key material.
//!
//! Covers deployments without an external key engine: AES content-key
//! wrapping via RFC 3394 AES-KW and record integrity via HMAC-SHA256.
//! Wrapping requires a 256-bit KEK.

use aes_kw::KekAes256;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::delegated::{ContentKey, DelegatedKey};
use crate::error::MaterialsError;
use crate::types::{KeyKind, AES_KEY_LENGTH, AES_WRAP_ALGORITHM};

type HmacSha256 = Hmac<Sha256>;

/// AES-KW adds one 8-byte integrity block to the wrapped output.
const AES_KW_OVERHEAD: usize = 8;

/// A symmetric delegated key held in process memory.
///
/// The algorithm identifier names the key's family: `AES` keys wrap and
/// unwrap content keys, `HmacSHA256` keys sign and verify. Key bytes are
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocalDelegatedKey {
    #[zeroize(skip)]
    algorithm: String,
    bytes: Vec<u8>,
}

impl LocalDelegatedKey {
    /// Generate a fresh key for `algorithm` at the family default length.
    pub fn generate(algorithm: &str) -> Result<Self, MaterialsError> {
        let key = ContentKey::generate(algorithm, None)?;
        Ok(Self {
            algorithm: algorithm.to_owned(),
            bytes: key.as_bytes().to_vec(),
        })
    }

    /// Create a key from existing raw material.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is empty, or has a length the `AES`
    /// family does not allow (16, 24, or 32 bytes).
    pub fn from_bytes(algorithm: &str, bytes: &[u8]) -> Result<Self, MaterialsError> {
        if algorithm == "AES" && !matches!(bytes.len(), 16 | 24 | 32) {
            return Err(MaterialsError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: bytes.len(),
            });
        }
        if bytes.is_empty() {
            return Err(MaterialsError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                got: 0,
            });
        }
        Ok(Self {
            algorithm: algorithm.to_owned(),
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn kek(&self) -> Result<KekAes256, MaterialsError> {
        let kek: [u8; AES_KEY_LENGTH] =
            self.bytes
                .as_slice()
                .try_into()
                .map_err(|_| MaterialsError::InvalidKeyLength {
                    expected: AES_KEY_LENGTH,
                    got: self.bytes.len(),
                })?;
        Ok(KekAes256::from(kek))
    }

    fn check_transform(&self, wrapping_algorithm: &str) -> Result<(), MaterialsError> {
        if self.algorithm != "AES" {
            return Err(MaterialsError::UnsupportedOperation(
                "only AES local keys can wrap content keys",
            ));
        }
        if wrapping_algorithm != AES_WRAP_ALGORITHM {
            return Err(MaterialsError::InvalidAlgorithm(format!(
                "local keys only support {AES_WRAP_ALGORITHM}, got {wrapping_algorithm}"
            )));
        }
        Ok(())
    }
}

impl DelegatedKey for LocalDelegatedKey {
    fn algorithm(&self) -> &str {
        &self.algorithm
    }

    fn wrap_key(
        &self,
        wrapping_algorithm: &str,
        content_key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>, MaterialsError> {
        self.check_transform(wrapping_algorithm)?;
        if aad.is_some() {
            return Err(MaterialsError::Wrapping(
                "AESWrap has no associated data slot".into(),
            ));
        }

        let mut wrapped = vec![0u8; content_key.len() + AES_KW_OVERHEAD];
        self.kek()?
            .wrap(content_key, &mut wrapped)
            .map_err(|e| MaterialsError::Wrapping(format!("{e:?}")))?;
        Ok(wrapped)
    }

    fn unwrap_key(
        &self,
        wrapping_algorithm: &str,
        wrapped_key: &[u8],
        expected_algorithm: &str,
        kind: KeyKind,
        aad: Option<&[u8]>,
    ) -> Result<ContentKey, MaterialsError> {
        self.check_transform(wrapping_algorithm)?;
        if kind == KeyKind::Asymmetric {
            return Err(MaterialsError::Unwrapping(
                "local keys only recover symmetric content keys".into(),
            ));
        }
        if aad.is_some() {
            return Err(MaterialsError::Unwrapping(
                "AESWrap has no associated data slot".into(),
            ));
        }
        if wrapped_key.len() <= AES_KW_OVERHEAD || wrapped_key.len() % 8 != 0 {
            return Err(MaterialsError::Unwrapping(format!(
                "wrapped key has invalid length {}",
                wrapped_key.len()
            )));
        }

        let mut unwrapped = vec![0u8; wrapped_key.len() - AES_KW_OVERHEAD];
        self.kek()?
            .unwrap(wrapped_key, &mut unwrapped)
            .map_err(|e| MaterialsError::Unwrapping(format!("{e:?}")))?;
        Ok(ContentKey::new(expected_algorithm, unwrapped))
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, MaterialsError> {
        let mut mac = HmacSha256::new_from_slice(&self.bytes)
            .map_err(|e| MaterialsError::InvalidAlgorithm(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<(), MaterialsError> {
        let mut mac = HmacSha256::new_from_slice(&self.bytes)
            .map_err(|e| MaterialsError::InvalidAlgorithm(e.to_string()))?;
        mac.update(data);
        mac.verify_slice(signature)
            .map_err(|_| MaterialsError::Verification)
    }
}

impl std::fmt::Debug for LocalDelegatedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalDelegatedKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
