//! End-to-end tests for the envelope materials flow: generate on the write
//! side, persist the description, recover on the read side.

use std::sync::Arc;

use sealfield::{
    ContentKey, CryptographicMaterials, CryptographicMaterialsProvider, DelegatedKey,
    EncryptionContext, KeyKind, LocalDelegatedKey, MaterialDescription, MaterialsError,
    WrappedCryptographicMaterials, WrappedMaterialsProvider, CONTENT_ENCRYPTION_ALGORITHM,
};

fn signing_key() -> Arc<dyn DelegatedKey> {
    Arc::new(LocalDelegatedKey::generate("HmacSHA256").unwrap())
}

fn aes_key() -> Arc<dyn DelegatedKey> {
    Arc::new(LocalDelegatedKey::generate("AES").unwrap())
}

#[test]
fn generate_persist_recover() {
    let wrap = aes_key();

    let generated = WrappedCryptographicMaterials::new(
        signing_key(),
        Some(wrap.clone()),
        None,
        MaterialDescription::new(),
    )
    .unwrap();

    // The description is what a caller persists next to the record.
    let stored = serde_json::to_string(generated.material_description()).unwrap();
    let loaded: MaterialDescription = serde_json::from_str(&stored).unwrap();

    let recovered =
        WrappedCryptographicMaterials::new(signing_key(), None, Some(wrap), loaded).unwrap();

    assert_eq!(
        recovered.decryption_key().unwrap().as_bytes(),
        generated.encryption_key().unwrap().as_bytes()
    );
}

#[test]
fn round_trip_across_key_sizes() {
    for spec in ["AES/128", "AES/192", "AES/256"] {
        let wrap = aes_key();
        let mut desc = MaterialDescription::new();
        desc.insert(CONTENT_ENCRYPTION_ALGORITHM, spec);

        let generated =
            WrappedCryptographicMaterials::new(signing_key(), Some(wrap.clone()), None, desc)
                .unwrap();
        let recovered = WrappedCryptographicMaterials::new(
            signing_key(),
            None,
            Some(wrap),
            generated.material_description().clone(),
        )
        .unwrap();

        assert_eq!(
            recovered.decryption_key().unwrap().as_bytes(),
            generated.encryption_key().unwrap().as_bytes()
        );
    }
}

#[test]
fn recovery_is_deterministic() {
    let wrap = aes_key();
    let generated = WrappedCryptographicMaterials::new(
        signing_key(),
        Some(wrap.clone()),
        None,
        MaterialDescription::new(),
    )
    .unwrap();

    let first = WrappedCryptographicMaterials::new(
        signing_key(),
        None,
        Some(wrap.clone()),
        generated.material_description().clone(),
    )
    .unwrap();
    let second = WrappedCryptographicMaterials::new(
        signing_key(),
        None,
        Some(wrap),
        generated.material_description().clone(),
    )
    .unwrap();

    assert_eq!(
        first.decryption_key().unwrap().as_bytes(),
        second.decryption_key().unwrap().as_bytes()
    );
}

/// Delegated key that panics if any capability is exercised. Used to prove
/// the missing-key failures happen before any delegated call.
struct TrippedKey;

impl DelegatedKey for TrippedKey {
    fn algorithm(&self) -> &str {
        "AES"
    }

    fn wrap_key(
        &self,
        _wrapping_algorithm: &str,
        _content_key: &[u8],
        _aad: Option<&[u8]>,
    ) -> Result<Vec<u8>, MaterialsError> {
        panic!("wrap must not be reached");
    }

    fn unwrap_key(
        &self,
        _wrapping_algorithm: &str,
        _wrapped_key: &[u8],
        _expected_algorithm: &str,
        _kind: KeyKind,
        _aad: Option<&[u8]>,
    ) -> Result<ContentKey, MaterialsError> {
        panic!("unwrap must not be reached");
    }
}

#[test]
fn missing_wrapping_key_fails_before_any_delegated_call() {
    // An unwrapping key is supplied but irrelevant: the empty description
    // selects the generation path, which must fail fast.
    let result = WrappedCryptographicMaterials::new(
        signing_key(),
        None,
        Some(Arc::new(TrippedKey)),
        MaterialDescription::new(),
    );
    assert!(matches!(result, Err(MaterialsError::Wrapping(_))));
}

#[test]
fn missing_unwrapping_key_fails_before_any_delegated_call() {
    let mut desc = MaterialDescription::new();
    desc.insert_bytes(sealfield::WRAPPED_CONTENT_KEY, &[0u8; 40]);
    let result = WrappedCryptographicMaterials::new(
        signing_key(),
        Some(Arc::new(TrippedKey)),
        None,
        desc,
    );
    assert!(matches!(result, Err(MaterialsError::Unwrapping(_))));
}

#[test]
fn provider_round_trip_with_signed_record() {
    let provider = WrappedMaterialsProvider::symmetric(signing_key(), aes_key());
    let context = EncryptionContext {
        table_name: "users".into(),
        record_id: "u-42".into(),
        ..Default::default()
    };

    let encryption = provider.encryption_materials(&context).unwrap();
    let signature = encryption
        .signing_key()
        .unwrap()
        .sign(b"ciphertext bytes")
        .unwrap();

    let decrypt_ctx = EncryptionContext {
        material_description: encryption.material_description().clone(),
        ..context
    };
    let decryption = provider.decryption_materials(&decrypt_ctx).unwrap();

    assert_eq!(
        decryption.decryption_key().unwrap().as_bytes(),
        encryption.encryption_key().unwrap().as_bytes()
    );
    decryption
        .verification_key()
        .unwrap()
        .verify(b"ciphertext bytes", &signature)
        .unwrap();
}

#[test]
fn different_signing_keys_fail_verification() {
    let wrap = aes_key();
    let writer = WrappedMaterialsProvider::symmetric(signing_key(), wrap.clone());
    let reader = WrappedMaterialsProvider::symmetric(signing_key(), wrap);
    let context = EncryptionContext::default();

    let encryption = writer.encryption_materials(&context).unwrap();
    let signature = encryption.signing_key().unwrap().sign(b"payload").unwrap();

    let decrypt_ctx = EncryptionContext {
        material_description: encryption.material_description().clone(),
        ..Default::default()
    };
    let decryption = reader.decryption_materials(&decrypt_ctx).unwrap();
    assert!(decryption
        .verification_key()
        .unwrap()
        .verify(b"payload", &signature)
        .is_err());
}
