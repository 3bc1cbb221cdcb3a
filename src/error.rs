use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterialsError {
    /// The default implementation of a contract method was invoked.
    /// Distinct from resolution failures so callers can tell "this provider
    /// does not do encryption/decryption" apart from "resolution failed".
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("wrapping failed: {0}")]
    Wrapping(String),

    #[error("unwrapping failed: {0}")]
    Unwrapping(String),

    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("malformed material description: {0}")]
    MalformedDescription(String),

    #[error("signature verification failed")]
    Verification,

    #[error("random number generation failed: {0}")]
    Rng(String),
}
