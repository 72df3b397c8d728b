//! Strong type definitions for the Timelock Vault.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::VaultKey;

/// Random bytes behind a freshly generated [`KeyId`].
const KEY_ID_ENTROPY_BYTES: usize = 16;

/// An opaque custody record identifier.
///
/// Generated ids carry 128 bits of randomness, independent of the key they
/// name, encoded as URL-safe base64 without padding (22 characters).
/// Ids read back from artifacts are taken verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    /// Generate a new random id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_ID_ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The server-held half of a time-locked file.
///
/// One record exists per encryption transaction. `key` and `unlock_at` never
/// change after the record is stored, and the record is the only copy of the
/// key in existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCustodyRecord {
    /// Primary key; equals the artifact's `id`.
    pub id: KeyId,
    /// The AES-256-GCM key. Never leaves the server.
    pub key: VaultKey,
    /// Earliest Unix time (seconds) at which the key may be used.
    pub unlock_at: i64,
    /// Unix time (seconds) of creation.
    pub created_at: i64,
    /// Filename supplied at encryption time.
    pub original_name: String,
}

impl KeyCustodyRecord {
    /// Whether the record's key may be released at `now`.
    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_url_safe() {
        let id = KeyId::generate();
        assert_eq!(id.as_str().len(), 22);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = KeyId::generate();
        let b = KeyId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_unlock_boundary() {
        let record = KeyCustodyRecord {
            id: KeyId::new("abc"),
            key: VaultKey::generate(),
            unlock_at: 1_000,
            created_at: 0,
            original_name: "a.txt".to_string(),
        };
        assert!(!record.is_unlocked(999));
        assert!(record.is_unlocked(1_000));
    }

    #[test]
    fn test_record_debug_hides_key() {
        let record = KeyCustodyRecord {
            id: KeyId::new("abc"),
            key: VaultKey::from_bytes([0xab; 32]),
            unlock_at: 1,
            created_at: 0,
            original_name: "a.txt".to_string(),
        };
        let rendered = format!("{:?}", record);
        assert!(!rendered.contains("abab"));
    }
}
