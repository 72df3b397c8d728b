//! The Vault: encryption engine and decryption gate.
//!
//! Encrypt mints a key, stores its custody record and hands back a signed
//! artifact. Decrypt walks a fixed sequence of checks (parse, authenticate,
//! time gate, lookup, AEAD) and stops at the first that fails; ciphertext is
//! only touched once every earlier check has passed.

use std::sync::Arc;

use bytes::Bytes;
use timelock_vault_core::{
    format_countdown, unlock_iso, Clock, CoreError, DurationTable, KeyCustodyRecord, KeyId,
    LockedArtifact, Signer, SystemClock, VaultKey, VaultNonce, ARTIFACT_VERSION,
};
use timelock_vault_store::{InsertResult, SqliteStore, VaultStore};

use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::outcome::{DecryptOutcome, LockStatus, Released, SealMetadata, Sealed};

/// The main Vault struct.
///
/// Holds the store, the signer built from the configured secret, and the
/// clock the time gate reads. Cheap to share behind an `Arc`; transactions
/// never mutate shared state other than inserting into the store.
pub struct Vault<S: VaultStore, C: Clock = SystemClock> {
    /// The custody store.
    store: Arc<S>,
    /// Signs and verifies artifact metadata.
    signer: Signer,
    /// Source of `now`.
    clock: C,
    /// Largest accepted plaintext.
    max_bytes: usize,
    durations: DurationTable,
}

impl Vault<SqliteStore> {
    /// Open the SQLite custody database named by the config.
    pub fn open(config: VaultConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.db_path)?;
        Ok(Self::new(store, config))
    }
}

impl<S: VaultStore> Vault<S> {
    /// Create a vault over `store` using the system clock.
    pub fn new(store: S, config: VaultConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: VaultStore, C: Clock> Vault<S, C> {
    /// Create a vault with an explicit clock.
    pub fn with_clock(store: S, clock: C, config: VaultConfig) -> Self {
        Self {
            store: Arc::new(store),
            signer: Signer::new(config.secret),
            clock,
            max_bytes: config.max_bytes,
            durations: DurationTable,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the clock reference.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Encryption Engine
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt `plaintext` so it can only be decrypted after `duration`.
    ///
    /// On success exactly one custody record has been stored. On any error
    /// nothing has been stored.
    pub async fn encrypt(&self, plaintext: &[u8], duration: &str, filename: &str) -> Result<Sealed> {
        if plaintext.is_empty() {
            tracing::debug!("rejected encrypt: empty input");
            return Err(VaultError::EmptyInput);
        }
        if plaintext.len() > self.max_bytes {
            tracing::debug!(size = plaintext.len(), max = self.max_bytes, "rejected encrypt: too large");
            return Err(VaultError::TooLarge {
                size: plaintext.len(),
                max_bytes: self.max_bytes,
            });
        }

        let duration = duration.to_ascii_lowercase();
        let seconds = self.durations.resolve(&duration).ok_or_else(|| {
            tracing::debug!(token = %duration, "rejected encrypt: unknown duration");
            VaultError::UnknownDuration {
                token: duration.clone(),
                valid: self.durations.tokens(),
            }
        })?;

        let now = self.clock.now();
        let unlock_at = now + seconds;
        let unlock_at_iso = unlock_iso(unlock_at);

        let key = VaultKey::generate();
        let nonce = VaultNonce::generate();
        let id = KeyId::generate();

        let ciphertext = key.encrypt(plaintext, &nonce)?;

        let signature = self.signer.sign(id.as_str(), unlock_at);

        let artifact = LockedArtifact {
            version: ARTIFACT_VERSION,
            id: id.clone(),
            unlock_at,
            unlock_at_iso: unlock_at_iso.clone(),
            original_name: filename.to_string(),
            nonce,
            ciphertext,
            signature,
        };
        // Serialize before storing so a failure here leaves nothing behind.
        let bytes = Bytes::from(artifact.to_bytes()?);

        let record = KeyCustodyRecord {
            id: id.clone(),
            key,
            unlock_at,
            created_at: now,
            original_name: filename.to_string(),
        };

        match self.store.put(&record).await {
            Ok(InsertResult::Inserted) => {}
            Ok(InsertResult::DuplicateId) => {
                tracing::error!(id = %id, "generated key id already present in store");
                return Err(VaultError::DuplicateId(id));
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "failed to store custody record");
                return Err(e.into());
            }
        }

        tracing::info!(
            id = %artifact.id,
            unlock_at,
            duration = %duration,
            size = plaintext.len(),
            "sealed file"
        );

        Ok(Sealed {
            artifact,
            bytes,
            metadata: SealMetadata {
                unlock_at,
                unlock_at_iso,
                duration,
            },
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decryption Gate
    // ─────────────────────────────────────────────────────────────────────────

    /// Decrypt a serialized artifact.
    ///
    /// Returns `Locked` before the unlock time and `Released` after it.
    /// Reads the store but never writes it, so repeated calls are harmless.
    pub async fn decrypt(&self, artifact_bytes: &[u8]) -> Result<DecryptOutcome> {
        let artifact = LockedArtifact::from_bytes(artifact_bytes).map_err(|e| {
            tracing::debug!(error = %e, "rejected decrypt: malformed artifact");
            malformed(e)
        })?;

        self.decrypt_artifact(&artifact).await
    }

    /// Decrypt an already parsed artifact.
    pub async fn decrypt_artifact(&self, artifact: &LockedArtifact) -> Result<DecryptOutcome> {
        // Authenticate
        if !self
            .signer
            .verify(artifact.id.as_str(), artifact.unlock_at, &artifact.signature)
        {
            tracing::warn!(id = %artifact.id, "artifact signature mismatch");
            return Err(VaultError::IntegrityFailure);
        }

        // Time gate
        let now = self.clock.now();
        if now < artifact.unlock_at {
            return Ok(locked(&artifact.id, artifact.unlock_at, now));
        }

        // Lookup
        let record = self.store.get(&artifact.id).await?.ok_or_else(|| {
            tracing::warn!(id = %artifact.id, "no custody record for signed artifact");
            VaultError::KeyNotFound(artifact.id.clone())
        })?;

        // The record's unlock time is authoritative over the artifact's.
        if !record.is_unlocked(now) {
            tracing::warn!(id = %artifact.id, "custody record unlocks later than artifact");
            return Ok(locked(&record.id, record.unlock_at, now));
        }

        if record.original_name != artifact.original_name {
            tracing::warn!(
                id = %artifact.id,
                "artifact filename differs from custody record; using record"
            );
        }

        // Decrypt
        let plaintext = record
            .key
            .decrypt(&artifact.ciphertext, &artifact.nonce)
            .map_err(|e| {
                tracing::warn!(id = %artifact.id, "ciphertext failed authentication");
                VaultError::DecryptionFailed(e.to_string())
            })?;

        tracing::info!(id = %artifact.id, size = plaintext.len(), "released file");

        Ok(DecryptOutcome::Released(Released {
            id: record.id,
            plaintext: Bytes::from(plaintext),
            original_name: record.original_name,
        }))
    }
}

fn locked(id: &KeyId, unlock_at: i64, now: i64) -> DecryptOutcome {
    let remaining_seconds = unlock_at - now;
    tracing::debug!(id = %id, remaining_seconds, "artifact still locked");
    DecryptOutcome::Locked(LockStatus {
        id: id.clone(),
        remaining_seconds,
        remaining_human: format_countdown(remaining_seconds),
        unlock_at,
        unlock_at_iso: unlock_iso(unlock_at),
    })
}

fn malformed(e: CoreError) -> VaultError {
    match e {
        CoreError::MalformedArtifact(msg) => VaultError::Malformed(msg),
        other => VaultError::Malformed(other.to_string()),
    }
}
