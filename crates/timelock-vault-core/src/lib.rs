//! # Timelock Vault Core
//!
//! Pure primitives for the Timelock Vault: duration tokens, artifact signing,
//! AEAD keys, and the locked-artifact wire format.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over the data that flows between the encryption and decryption transactions.
//!
//! ## Key Types
//!
//! - [`LockedArtifact`] - The client-held `.tlp` blob
//! - [`KeyCustodyRecord`] - The server-held key and its release time
//! - [`Signer`] - Authentication tag over an artifact's `{id, unlock_at}`
//! - [`VaultKey`] / [`VaultNonce`] - AES-256-GCM key material
//! - [`Clock`] - Source of the current Unix time
//!
//! ## Wire Format
//!
//! Locked artifacts are JSON objects. See [`artifact`] module.

pub mod artifact;
pub mod clock;
pub mod countdown;
pub mod crypto;
pub mod duration;
pub mod error;
pub mod signer;
pub mod target;
pub mod types;

pub use artifact::{LockedArtifact, ARTIFACT_EXTENSION, ARTIFACT_VERSION, DEFAULT_ORIGINAL_NAME};
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{format_countdown, unlock_iso};
pub use crypto::{VaultKey, VaultNonce, KEY_LEN, NONCE_LEN};
pub use duration::{resolve_duration, DurationTable, DEFAULT_DURATION, DURATIONS};
pub use error::{CoreError, Result};
pub use signer::{ServerSecret, Signer, SIGNATURE_HEX_LEN};
pub use target::{EncryptTarget, DEFAULT_FILENAME};
pub use types::{KeyCustodyRecord, KeyId};
