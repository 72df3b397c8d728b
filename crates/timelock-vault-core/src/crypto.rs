//! AEAD primitives for the Timelock Vault.
//!
//! AES-256-GCM with a 96-bit nonce, a 128-bit tag appended to the ciphertext,
//! and no associated data.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// A 256-bit symmetric key. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey([u8; KEY_LEN]);

impl VaultKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|_| CoreError::InvalidKeyLength {
            expected: KEY_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Encrypt data with this key. Output is ciphertext followed by the tag.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &VaultNonce) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.0)
            .map_err(|e| CoreError::EncryptionError(e.to_string()))?;

        cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| CoreError::EncryptionError(e.to_string()))
    }

    /// Decrypt data with this key. Fails if the tag does not verify.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &VaultNonce) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.0)
            .map_err(|e| CoreError::DecryptionError(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|_| CoreError::DecryptionError("authentication tag mismatch".to_string()))
    }
}

impl PartialEq for VaultKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for VaultKey {}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}

/// A 96-bit AES-GCM nonce. Fresh per encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultNonce(pub [u8; NONCE_LEN]);

impl VaultNonce {
    /// Generate a new random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; NONCE_LEN] = bytes.try_into().map_err(|_| {
            CoreError::MalformedArtifact(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let key = VaultKey::generate();
        let nonce = VaultNonce::generate();
        let plaintext = b"hello, vault!";

        let ciphertext = key.encrypt(plaintext, &nonce).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + 16);
        assert_ne!(&ciphertext[..plaintext.len()], plaintext);

        let decrypted = key.decrypt(&ciphertext, &nonce).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_decrypt_wrong_key_fails() {
        let key1 = VaultKey::generate();
        let key2 = VaultKey::generate();
        let nonce = VaultNonce::generate();

        let ciphertext = key1.encrypt(b"secret", &nonce).unwrap();
        assert!(key2.decrypt(&ciphertext, &nonce).is_err());
    }

    #[test]
    fn test_decrypt_wrong_nonce_fails() {
        let key = VaultKey::generate();
        let ciphertext = key.encrypt(b"secret", &VaultNonce::generate()).unwrap();
        assert!(key.decrypt(&ciphertext, &VaultNonce::generate()).is_err());
    }

    #[test]
    fn test_known_answer() {
        // NIST GCM test case 13: all-zero key and nonce, empty plaintext.
        let key = VaultKey::from_bytes([0u8; 32]);
        let nonce = VaultNonce::from_bytes([0u8; 12]);
        let tag = key.encrypt(b"", &nonce).unwrap();
        assert_eq!(hex::encode(tag), "530f8afbc74536b9a963b4f1c4cb738b");
    }

    #[test]
    fn test_key_from_slice_checks_length() {
        assert!(VaultKey::from_slice(&[0u8; 32]).is_ok());
        assert!(matches!(
            VaultKey::from_slice(&[0u8; 16]),
            Err(CoreError::InvalidKeyLength { expected: 32, got: 16 })
        ));
    }

    #[test]
    fn test_nonce_from_slice_checks_length() {
        assert!(VaultNonce::from_slice(&[0u8; 12]).is_ok());
        assert!(VaultNonce::from_slice(&[0u8; 8]).is_err());
    }

    #[test]
    fn test_key_debug_redacted() {
        let key = VaultKey::from_bytes([0x42; 32]);
        assert_eq!(format!("{:?}", key), "VaultKey(<redacted>)");
    }
}
