//! Wrapped cryptographic materials: an ephemeral content key per record,
//! wrapped by a long-lived delegated key.
//!
//! Construction resolves the content key exactly once. The material
//! description selects the path deterministically: if it already holds a
//! wrapped content key the key is recovered by unwrapping, otherwise a fresh
//! key is generated, wrapped, and written into a new copy of the description.
//! There is no fallback between the two paths.

use std::sync::Arc;

use crate::delegated::{ContentKey, DelegatedKey};
use crate::description::{
    MaterialDescription, CONTENT_ENCRYPTION_ALGORITHM, CONTENT_KEY_WRAPPING_ALGORITHM,
    WRAPPED_CONTENT_KEY,
};
use crate::error::MaterialsError;
use crate::materials::CryptographicMaterials;
use crate::types::{KeyKind, AES_WRAP_ALGORITHM, RSA_OAEP_WRAP_ALGORITHM};

/// Content encryption algorithm spec used when the description does not pin
/// one: cipher family `/` key length in bits.
pub const DEFAULT_CONTENT_ENCRYPTION_ALGORITHM: &str = "AES/256";

/// Translate a key's native algorithm identifier to its wrapping transform.
/// Unrecognized identifiers pass through unchanged.
fn wrapping_transformation(algorithm: &str) -> &str {
    match algorithm {
        "AES" => AES_WRAP_ALGORITHM,
        "RSA" => RSA_OAEP_WRAP_ALGORITHM,
        other => other,
    }
}

/// Split an algorithm spec like `AES/256` into its cipher family and
/// optional key length in bytes.
fn parse_algorithm_spec(spec: &str) -> Result<(&str, Option<usize>), MaterialsError> {
    match spec.split_once('/') {
        None => Ok((spec, None)),
        Some((family, bits)) => {
            let bits: usize = bits.parse().map_err(|_| {
                MaterialsError::InvalidAlgorithm(format!(
                    "bad key length in algorithm spec {spec}"
                ))
            })?;
            Ok((family, Some(bits / 8)))
        }
    }
}

/// Cipher family an algorithm spec names: everything before the first `/`.
fn algorithm_family(spec: &str) -> &str {
    match spec.split_once('/') {
        Some((family, _)) => family,
        None => spec,
    }
}

/// Envelope-encryption materials.
///
/// The single content key serves both encryption and decryption (symmetric
/// scheme), and the single signing key serves both signing and verification
/// (symmetric MAC). Keeping the signing key separate from the content key
/// means neither compromises the other.
pub struct WrappedCryptographicMaterials {
    signing_key: Arc<dyn DelegatedKey>,
    content_key: ContentKey,
    description: MaterialDescription,
}

impl WrappedCryptographicMaterials {
    /// Build materials from delegated keys and a material description.
    ///
    /// `wrapping_key` is required when `material_description` does not carry
    /// a wrapped content key (generation path); `unwrapping_key` is required
    /// when it does (recovery path). The caller keeps ownership of its own
    /// description copy; this constructor never mutates what was passed in,
    /// it derives a new description on the generation path.
    ///
    /// # Errors
    ///
    /// [`MaterialsError::Wrapping`] when generation is selected with no
    /// wrapping key, [`MaterialsError::Unwrapping`] when recovery is
    /// selected with no unwrapping key or the unwrap itself fails. Either
    /// failure is atomic: no partially initialized materials exist.
    pub fn new(
        signing_key: Arc<dyn DelegatedKey>,
        wrapping_key: Option<Arc<dyn DelegatedKey>>,
        unwrapping_key: Option<Arc<dyn DelegatedKey>>,
        material_description: MaterialDescription,
    ) -> Result<Self, MaterialsError> {
        let content_algorithm = material_description
            .get(CONTENT_ENCRYPTION_ALGORITHM)
            .unwrap_or(DEFAULT_CONTENT_ENCRYPTION_ALGORITHM)
            .to_owned();

        // Recovery always wins over generation when both keys are supplied.
        if material_description.contains(WRAPPED_CONTENT_KEY) {
            let content_key = recover_content_key(
                unwrapping_key.as_deref(),
                &content_algorithm,
                &material_description,
            )?;
            Ok(Self {
                signing_key,
                content_key,
                description: material_description,
            })
        } else {
            let (content_key, description) = generate_content_key(
                wrapping_key.as_deref(),
                &content_algorithm,
                &material_description,
            )?;
            Ok(Self {
                signing_key,
                content_key,
                description,
            })
        }
    }
}

impl CryptographicMaterials for WrappedCryptographicMaterials {
    fn material_description(&self) -> &MaterialDescription {
        &self.description
    }

    fn encryption_key(&self) -> Result<&ContentKey, MaterialsError> {
        Ok(&self.content_key)
    }

    fn decryption_key(&self) -> Result<&ContentKey, MaterialsError> {
        Ok(&self.content_key)
    }

    fn signing_key(&self) -> Result<&dyn DelegatedKey, MaterialsError> {
        Ok(self.signing_key.as_ref())
    }

    fn verification_key(&self) -> Result<&dyn DelegatedKey, MaterialsError> {
        Ok(self.signing_key.as_ref())
    }
}

/// Recovery path: unwrap the content key stored in the description.
fn recover_content_key(
    unwrapping_key: Option<&dyn DelegatedKey>,
    content_algorithm: &str,
    description: &MaterialDescription,
) -> Result<ContentKey, MaterialsError> {
    let unwrapping_key = unwrapping_key.ok_or_else(|| {
        MaterialsError::Unwrapping(
            "materials cannot be loaded from material description: no unwrapping key".into(),
        )
    })?;

    let wrapping_algorithm = description
        .get(CONTENT_KEY_WRAPPING_ALGORITHM)
        .unwrap_or_else(|| unwrapping_key.algorithm());
    let wrapped_key = description
        .get_bytes(WRAPPED_CONTENT_KEY)?
        .ok_or_else(|| MaterialsError::Unwrapping("wrapped content key missing".into()))?;

    unwrapping_key
        .unwrap_key(
            wrapping_algorithm,
            &wrapped_key,
            algorithm_family(content_algorithm),
            KeyKind::Symmetric,
            None,
        )
        .map_err(|e| match e {
            e @ MaterialsError::Unwrapping(_) => e,
            other => MaterialsError::Unwrapping(other.to_string()),
        })
}

/// Generation path: create a fresh content key, wrap it, and derive a new
/// description that pins everything needed for future recovery.
fn generate_content_key(
    wrapping_key: Option<&dyn DelegatedKey>,
    content_algorithm: &str,
    description: &MaterialDescription,
) -> Result<(ContentKey, MaterialDescription), MaterialsError> {
    let wrapping_key = wrapping_key.ok_or_else(|| {
        MaterialsError::Wrapping("materials cannot be generated: no wrapping key".into())
    })?;

    let wrapping_algorithm = description
        .get(CONTENT_KEY_WRAPPING_ALGORITHM)
        .unwrap_or_else(|| wrapping_transformation(wrapping_key.algorithm()))
        .to_owned();

    let (family, key_length) = parse_algorithm_spec(content_algorithm)?;
    let content_key = ContentKey::generate(family, key_length)?;
    let wrapped_key = wrapping_key
        .wrap_key(&wrapping_algorithm, content_key.as_bytes(), None)
        .map_err(|e| match e {
            e @ MaterialsError::Wrapping(_) => e,
            other => MaterialsError::Wrapping(other.to_string()),
        })?;

    let mut new_description = description.clone();
    new_description.insert_bytes(WRAPPED_CONTENT_KEY, &wrapped_key);
    new_description.insert(CONTENT_ENCRYPTION_ALGORITHM, content_algorithm);
    new_description.insert(CONTENT_KEY_WRAPPING_ALGORITHM, wrapping_algorithm);
    Ok((content_key, new_description))
}
