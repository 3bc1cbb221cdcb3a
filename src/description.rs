//! Portable wrapping metadata persisted alongside each encrypted record.
//!
//! A material description is a flat, ordered string-to-string map. Binary
//! values are base64-encoded so every value is representable in the store's
//! native string type. Keys this crate does not recognize are carried through
//! untouched for forward compatibility.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::MaterialsError;

/// Description key holding the base64-encoded wrapped content key.
pub const WRAPPED_CONTENT_KEY: &str = "wrapped-content-key";

/// Description key holding the content encryption algorithm spec,
/// e.g. `AES/256` (cipher family `/` key length in bits).
pub const CONTENT_ENCRYPTION_ALGORITHM: &str = "content-encryption-algorithm";

/// Description key holding the wrapping transform name used on the content key.
pub const CONTENT_KEY_WRAPPING_ALGORITHM: &str = "content-key-wrapping-algorithm";

/// Metadata map stored with a record, sufficient to recover its content key
/// given the right unwrapping key.
///
/// Value type: cloning is the defensive copy. Iteration order is
/// deterministic (sorted by key).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialDescription {
    entries: BTreeMap<String, String>,
}

impl MaterialDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Base64-encode `bytes` and store them under `key`.
    pub fn insert_bytes(&mut self, key: impl Into<String>, bytes: &[u8]) {
        self.entries.insert(key.into(), BASE64.encode(bytes));
    }

    /// Decode the base64 value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not valid base64.
    pub fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, MaterialsError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => BASE64
                .decode(value)
                .map(Some)
                .map_err(|e| {
                    MaterialsError::MalformedDescription(format!("{key}: {e}"))
                }),
        }
    }
}

impl From<BTreeMap<String, String>> for MaterialDescription {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, String)> for MaterialDescription {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
