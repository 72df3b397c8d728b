//! Error types for the Vault.

use thiserror::Error;
use timelock_vault_core::{CoreError, KeyId};
use timelock_vault_store::StoreError;

use crate::config::ConfigError;

/// Errors that can occur during Vault operations.
///
/// A still-locked artifact is not an error; see [`crate::DecryptOutcome`].
#[derive(Debug, Error)]
pub enum VaultError {
    /// Encrypt was called with no data.
    #[error("no file data in request")]
    EmptyInput,

    /// Plaintext exceeds the configured maximum.
    #[error("file too large: {size} bytes (max {max_bytes})")]
    TooLarge { size: usize, max_bytes: usize },

    /// Duration token is not in the table.
    #[error("unknown duration '{token}'. Valid: {}", .valid.join(", "))]
    UnknownDuration {
        token: String,
        valid: Vec<&'static str>,
    },

    /// Artifact could not be parsed.
    #[error("malformed artifact: {0}")]
    Malformed(String),

    /// Artifact's `id`/`unlock_at` do not match its signature.
    #[error("integrity check failed: artifact may have been tampered with")]
    IntegrityFailure,

    /// No custody record for this id; the custody database may have been reset.
    #[error("key not found: {0}")]
    KeyNotFound(KeyId),

    /// Ciphertext did not authenticate under the custody key.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// A freshly generated id already exists in the store.
    #[error("duplicate key id: {0}")]
    DuplicateId(KeyId),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure inside a crypto or encoding primitive.
    #[error("internal error: {0}")]
    Internal(#[from] CoreError),
}

/// Machine-checkable category of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    TooLarge,
    UnknownDuration,
    Malformed,
    IntegrityFailure,
    KeyNotFound,
    DecryptionFailed,
    DuplicateId,
    Storage,
    Config,
    Internal,
}

impl ErrorKind {
    /// Conventional HTTP status for a transport reporting this error.
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::EmptyInput | ErrorKind::UnknownDuration | ErrorKind::Malformed => 400,
            ErrorKind::TooLarge => 413,
            ErrorKind::IntegrityFailure => 403,
            ErrorKind::KeyNotFound => 404,
            ErrorKind::DecryptionFailed
            | ErrorKind::DuplicateId
            | ErrorKind::Storage
            | ErrorKind::Config
            | ErrorKind::Internal => 500,
        }
    }

    /// Whether the caller can fix this by changing the request.
    pub const fn is_caller_error(self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyInput | ErrorKind::TooLarge | ErrorKind::UnknownDuration
        )
    }
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::EmptyInput => ErrorKind::EmptyInput,
            VaultError::TooLarge { .. } => ErrorKind::TooLarge,
            VaultError::UnknownDuration { .. } => ErrorKind::UnknownDuration,
            VaultError::Malformed(_) => ErrorKind::Malformed,
            VaultError::IntegrityFailure => ErrorKind::IntegrityFailure,
            VaultError::KeyNotFound(_) => ErrorKind::KeyNotFound,
            VaultError::DecryptionFailed(_) => ErrorKind::DecryptionFailed,
            VaultError::DuplicateId(_) => ErrorKind::DuplicateId,
            VaultError::Store(_) => ErrorKind::Storage,
            VaultError::Config(_) => ErrorKind::Config,
            VaultError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for Vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
