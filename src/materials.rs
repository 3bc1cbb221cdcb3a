//! Cryptographic materials contract.

use crate::delegated::{ContentKey, DelegatedKey};
use crate::description::MaterialDescription;
use crate::error::MaterialsError;

/// Read-only bundle of keys plus the material description that reproduces
/// them.
///
/// Every accessor except `material_description` defaults to
/// [`MaterialsError::UnsupportedOperation`], so an implementation only
/// provides the roles it actually has: encryption-side materials need the
/// encryption and signing keys, decryption-side materials the decryption and
/// verification keys.
pub trait CryptographicMaterials: Send + Sync {
    /// Metadata to persist alongside the record. Required to rebuild the
    /// decryption-side materials later.
    fn material_description(&self) -> &MaterialDescription;

    /// Content key used for encrypting attribute bytes.
    fn encryption_key(&self) -> Result<&ContentKey, MaterialsError> {
        Err(MaterialsError::UnsupportedOperation(
            "no encryption key in these materials",
        ))
    }

    /// Content key used for decrypting attribute bytes.
    fn decryption_key(&self) -> Result<&ContentKey, MaterialsError> {
        Err(MaterialsError::UnsupportedOperation(
            "no decryption key in these materials",
        ))
    }

    /// Delegated key used for calculating record signatures.
    fn signing_key(&self) -> Result<&dyn DelegatedKey, MaterialsError> {
        Err(MaterialsError::UnsupportedOperation(
            "no signing key in these materials",
        ))
    }

    /// Delegated key used for verifying record signatures.
    fn verification_key(&self) -> Result<&dyn DelegatedKey, MaterialsError> {
        Err(MaterialsError::UnsupportedOperation(
            "no verification key in these materials",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DescriptionOnly(MaterialDescription);

    impl CryptographicMaterials for DescriptionOnly {
        fn material_description(&self) -> &MaterialDescription {
            &self.0
        }
    }

    #[test]
    fn key_accessors_default_to_unsupported() {
        let materials = DescriptionOnly(MaterialDescription::new());
        assert!(matches!(
            materials.encryption_key(),
            Err(MaterialsError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            materials.decryption_key(),
            Err(MaterialsError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            materials.signing_key(),
            Err(MaterialsError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            materials.verification_key(),
            Err(MaterialsError::UnsupportedOperation(_))
        ));
    }
}
