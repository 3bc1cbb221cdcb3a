//! Materials providers: the request-level facade in front of materials
//! construction.

use std::sync::Arc;

use tracing::debug;

use crate::delegated::DelegatedKey;
use crate::error::MaterialsError;
use crate::materials::CryptographicMaterials;
use crate::types::EncryptionContext;
use crate::wrapped::WrappedCryptographicMaterials;

/// Hands out materials for a logical record.
///
/// Both materials methods default to
/// [`MaterialsError::UnsupportedOperation`]: a provider that does not
/// override them observably does not do encryption/decryption, which is
/// different from one that resolves materials and fails. `refresh` is a
/// no-op by default and never fails; caching or rotating providers may
/// override it to invalidate their state.
pub trait CryptographicMaterialsProvider: Send + Sync {
    /// Materials for encrypting a record.
    fn encryption_materials(
        &self,
        context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        let _ = context;
        Err(MaterialsError::UnsupportedOperation(
            "no encryption materials available",
        ))
    }

    /// Materials for decrypting a record.
    fn decryption_materials(
        &self,
        context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        let _ = context;
        Err(MaterialsError::UnsupportedOperation(
            "no decryption materials available",
        ))
    }

    /// Drop any cached material state. Idempotent; the default does nothing.
    fn refresh(&self) {}
}

/// Provider that returns pre-built materials for every context.
///
/// Directions it was not configured for report `UnsupportedOperation`.
pub struct StaticMaterialsProvider {
    encryption: Option<Arc<dyn CryptographicMaterials>>,
    decryption: Option<Arc<dyn CryptographicMaterials>>,
}

impl StaticMaterialsProvider {
    pub fn new(
        encryption: Option<Arc<dyn CryptographicMaterials>>,
        decryption: Option<Arc<dyn CryptographicMaterials>>,
    ) -> Self {
        Self {
            encryption,
            decryption,
        }
    }
}

impl CryptographicMaterialsProvider for StaticMaterialsProvider {
    fn encryption_materials(
        &self,
        _context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        self.encryption.clone().ok_or(MaterialsError::UnsupportedOperation(
            "static provider was built without encryption materials",
        ))
    }

    fn decryption_materials(
        &self,
        _context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        self.decryption.clone().ok_or(MaterialsError::UnsupportedOperation(
            "static provider was built without decryption materials",
        ))
    }
}

/// Provider that builds [`WrappedCryptographicMaterials`] per request from
/// long-lived signing, wrapping, and unwrapping keys.
///
/// Encryption requests generate a fresh wrapped content key; decryption
/// requests recover the content key from the material description carried in
/// the context (loaded from the stored record).
pub struct WrappedMaterialsProvider {
    signing_key: Arc<dyn DelegatedKey>,
    wrapping_key: Option<Arc<dyn DelegatedKey>>,
    unwrapping_key: Option<Arc<dyn DelegatedKey>>,
}

impl WrappedMaterialsProvider {
    pub fn new(
        signing_key: Arc<dyn DelegatedKey>,
        wrapping_key: Option<Arc<dyn DelegatedKey>>,
        unwrapping_key: Option<Arc<dyn DelegatedKey>>,
    ) -> Self {
        Self {
            signing_key,
            wrapping_key,
            unwrapping_key,
        }
    }

    /// Convenience constructor for symmetric deployments where one key both
    /// wraps and unwraps.
    pub fn symmetric(
        signing_key: Arc<dyn DelegatedKey>,
        wrapping_key: Arc<dyn DelegatedKey>,
    ) -> Self {
        Self {
            signing_key,
            wrapping_key: Some(wrapping_key.clone()),
            unwrapping_key: Some(wrapping_key),
        }
    }
}

impl CryptographicMaterialsProvider for WrappedMaterialsProvider {
    fn encryption_materials(
        &self,
        context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        debug!(
            table = %context.table_name,
            record = %context.record_id,
            "building wrapped encryption materials"
        );
        let materials = WrappedCryptographicMaterials::new(
            self.signing_key.clone(),
            self.wrapping_key.clone(),
            None,
            Default::default(),
        )?;
        Ok(Arc::new(materials))
    }

    fn decryption_materials(
        &self,
        context: &EncryptionContext,
    ) -> Result<Arc<dyn CryptographicMaterials>, MaterialsError> {
        debug!(
            table = %context.table_name,
            record = %context.record_id,
            "recovering wrapped decryption materials"
        );
        let materials = WrappedCryptographicMaterials::new(
            self.signing_key.clone(),
            None,
            self.unwrapping_key.clone(),
            context.material_description.clone(),
        )?;
        Ok(Arc::new(materials))
    }
}
