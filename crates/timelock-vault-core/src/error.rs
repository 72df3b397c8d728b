//! Error types for the Timelock Vault Core.

use thiserror::Error;

/// Core errors that can occur while handling keys and artifacts.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("unsupported artifact version: {0}")]
    UnsupportedVersion(u32),

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("server secret must not be empty")]
    EmptySecret,

    #[error("encryption error: {0}")]
    EncryptionError(String),

    #[error("decryption error: {0}")]
    DecryptionError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
