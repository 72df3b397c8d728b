//! Values returned by the vault's two transactions.

use bytes::Bytes;
use timelock_vault_core::{KeyId, LockedArtifact};

/// Result of a successful encrypt.
#[derive(Debug, Clone)]
pub struct Sealed {
    /// The artifact as built.
    pub artifact: LockedArtifact,
    /// The artifact serialized for the caller to keep.
    pub bytes: Bytes,
    /// Unlock time, surfaced so callers need not parse `bytes`.
    pub metadata: SealMetadata,
}

impl Sealed {
    /// Suggested filename for the locked copy, e.g. `report.pdf.tlp`.
    pub fn download_name(&self) -> String {
        LockedArtifact::file_name_for(&self.artifact.original_name)
    }
}

/// Out-of-band description of a sealed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealMetadata {
    pub unlock_at: i64,
    pub unlock_at_iso: String,
    /// The duration token, lowercased.
    pub duration: String,
}

/// Result of a decrypt that passed the integrity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptOutcome {
    /// The unlock time has passed and the plaintext is returned.
    Released(Released),
    /// The unlock time is still in the future. Retry later.
    Locked(LockStatus),
}

impl DecryptOutcome {
    pub fn is_locked(&self) -> bool {
        matches!(self, DecryptOutcome::Locked(_))
    }

    /// The released plaintext, if any.
    pub fn released(self) -> Option<Released> {
        match self {
            DecryptOutcome::Released(released) => Some(released),
            DecryptOutcome::Locked(_) => None,
        }
    }
}

/// A released file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Released {
    pub id: KeyId,
    pub plaintext: Bytes,
    /// Filename from the custody record.
    pub original_name: String,
}

/// Countdown for an artifact that is not yet unlockable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockStatus {
    pub id: KeyId,
    /// Whole seconds until `unlock_at`; always positive.
    pub remaining_seconds: i64,
    /// `remaining_seconds` rendered as e.g. `"2d 3h 15m"`.
    pub remaining_human: String,
    pub unlock_at: i64,
    pub unlock_at_iso: String,
}

impl LockStatus {
    /// HTTP 423 Locked.
    pub const STATUS_CODE: u16 = 423;

    pub fn message(&self) -> String {
        format!("This file unlocks in {}", self.remaining_human)
    }
}
