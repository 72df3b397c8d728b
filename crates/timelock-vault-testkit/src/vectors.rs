//! Golden vectors for signature and artifact compatibility.
//!
//! Artifacts written by earlier deployments must keep verifying and
//! decrypting, so the tag function and wire format are pinned here with
//! values computed by the reference tag function.

use serde::{Deserialize, Serialize};
use timelock_vault_core::{KeyCustodyRecord, KeyId, ServerSecret, Signer, VaultKey};

/// A known signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub secret: String,
    pub id: String,
    pub unlock_at: i64,
    /// Expected tag, 32 hex chars.
    pub signature: String,
}

fn vector(name: &str, secret: &str, id: &str, unlock_at: i64, signature: &str) -> GoldenVector {
    GoldenVector {
        name: name.to_string(),
        secret: secret.to_string(),
        id: id.to_string(),
        unlock_at,
        signature: signature.to_string(),
    }
}

/// All signature vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        vector(
            "short_id",
            "test-secret",
            "abc123",
            1_700_000_000,
            "8719ba95292786172b96cf931bd09d81",
        ),
        vector(
            "hex_secret",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "Zm9vYmFyYmF6cXV4cXV1",
            1_760_000_000,
            "8d33651cc6921912d7ad1b8df7c59a0f",
        ),
        vector(
            "zero_unlock",
            "server-secret",
            "hello-vault-id",
            0,
            "255f56ea8680b0e1f530d44f8b80dc8d",
        ),
        vector(
            "testkit_short_id",
            "testkit-secret",
            "abc123",
            1_700_000_000,
            "ddc9b37e4c6dbc54c8383be8d9ec0c19",
        ),
        vector(
            "empty_id",
            "testkit-secret",
            "",
            1,
            "745ed19268809753748df5220b24bd89",
        ),
        vector(
            "colon_in_id",
            "testkit-secret",
            "id-with:colon",
            42,
            "2f5f35189c74bfa489cc21a196ef644b",
        ),
    ]
}

/// Check every vector; returns the names of those that fail.
pub fn verify_all_vectors() -> Result<(), Vec<String>> {
    let failures: Vec<String> = all_vectors()
        .into_iter()
        .filter(|v| {
            let signer = match ServerSecret::new(v.secret.clone()) {
                Ok(secret) => Signer::new(secret),
                Err(_) => return true,
            };
            signer.sign(&v.id, v.unlock_at) != v.signature
                || !signer.verify(&v.id, v.unlock_at, &v.signature)
        })
        .map(|v| v.name)
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

/// Secret used to sign [`LEGACY_ARTIFACT`].
pub const LEGACY_SECRET: &str = "testkit-secret";

/// Plaintext sealed inside [`LEGACY_ARTIFACT`].
pub const LEGACY_PLAINTEXT: &[u8] = b"hello, vault!";

/// An artifact in the exact byte layout earlier deployments emitted
/// (`", "` / `": "` separators), unlocking at 1_700_003_600.
pub const LEGACY_ARTIFACT: &str = r#"{"v": 1, "id": "q3X9fLm2TnWc8RzK1bYpVg", "unlock_at": 1700003600, "unlock_iso": "2023-11-14T23:13:20+00:00", "original": "greeting.txt", "nonce": "AAECAwQFBgcICQoL", "ct": "L2e6d6rJ4m3sNPv/kB0CDzUsnCXbehHBzCoyUmo=", "_sig": "d8342fc91cc7289cf7981786414798d3"}"#;

/// The custody record that [`LEGACY_ARTIFACT`] needs on the server.
pub fn legacy_record() -> KeyCustodyRecord {
    let mut key = [0u8; 32];
    for (i, b) in key.iter_mut().enumerate() {
        *b = i as u8;
    }
    KeyCustodyRecord {
        id: KeyId::new("q3X9fLm2TnWc8RzK1bYpVg"),
        key: VaultKey::from_bytes(key),
        unlock_at: 1_700_003_600,
        created_at: 1_700_000_000,
        original_name: "greeting.txt".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timelock_vault_core::LockedArtifact;

    #[test]
    fn test_all_vectors_verify() {
        assert_eq!(verify_all_vectors(), Ok(()));
    }

    #[test]
    fn test_vectors_serialize() {
        let json = serde_json::to_string(&all_vectors()).unwrap();
        let back: Vec<GoldenVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), all_vectors().len());
    }

    #[test]
    fn test_legacy_artifact_parses_and_decrypts() {
        let artifact = LockedArtifact::from_bytes(LEGACY_ARTIFACT.as_bytes()).unwrap();
        let record = legacy_record();
        assert_eq!(artifact.id, record.id);

        let signer = Signer::new(ServerSecret::new(LEGACY_SECRET).unwrap());
        assert!(signer.verify(artifact.id.as_str(), artifact.unlock_at, &artifact.signature));

        let plaintext = record.key.decrypt(&artifact.ciphertext, &artifact.nonce).unwrap();
        assert_eq!(plaintext, LEGACY_PLAINTEXT);
    }
}
