//! Artifact signing.
//!
//! The tag binds an artifact's `id` and `unlock_at` to the server secret so
//! neither can be edited to move the time gate. It is
//! `hex(SHA-256(secret || "{id}:{unlock_at}"))` truncated to
//! [`SIGNATURE_HEX_LEN`] characters, the format existing artifacts carry.
//!
//! Ciphertext and filename are not covered; the ciphertext is protected by
//! its own AEAD tag.

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

/// Length of a signature in hex characters (128 bits).
pub const SIGNATURE_HEX_LEN: usize = 32;

/// The process-wide signing secret.
///
/// Supplied at startup or generated once. It must outlive every artifact it
/// signed, and is never stored next to the custody records.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ServerSecret(String);

impl ServerSecret {
    /// Generate a new secret: 32 random bytes, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);
        bytes.zeroize();
        Self(secret)
    }

    /// Use an externally supplied secret.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(CoreError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// The bytes fed to the hash.
    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ServerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServerSecret(<redacted>)")
    }
}

/// Computes and checks artifact signatures.
#[derive(Debug, Clone)]
pub struct Signer {
    secret: ServerSecret,
}

impl Signer {
    pub fn new(secret: ServerSecret) -> Self {
        Self { secret }
    }

    /// Sign `{id, unlock_at}`.
    pub fn sign(&self, id: &str, unlock_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(format!("{}:{}", id, unlock_at).as_bytes());

        let mut tag = hex::encode(hasher.finalize());
        tag.truncate(SIGNATURE_HEX_LEN);
        tag
    }

    /// Check a tag in constant time with respect to its value.
    pub fn verify(&self, id: &str, unlock_at: i64, tag: &str) -> bool {
        let expected = self.sign(id, unlock_at);
        expected.as_bytes().ct_eq(tag.as_bytes()).into()
    }
}
