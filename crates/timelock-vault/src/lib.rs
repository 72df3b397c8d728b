//! # Timelock Vault
//!
//! Encrypt a file under a fresh key that the server will not use again until
//! a chosen time has passed.
//!
//! ## Overview
//!
//! - **Encrypt**: plaintext + duration token → a signed locked artifact. The
//!   key stays on the server in a custody record.
//! - **Decrypt**: locked artifact → plaintext, but only once its unlock time
//!   has passed and only if its signature and ciphertext check out.
//!
//! Callers never see keys. The artifact is self-describing; the server keeps
//! nothing about it except the custody record.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timelock_vault::{DecryptOutcome, Vault, VaultConfig};
//!
//! async fn example() {
//!     let config = VaultConfig::from_env().unwrap();
//!     let vault = Vault::open(config).unwrap();
//!
//!     let sealed = vault
//!         .encrypt(b"open me next year", "1year", "letter.txt")
//!         .await
//!         .unwrap();
//!     println!("unlocks at {}", sealed.metadata.unlock_at_iso);
//!
//!     match vault.decrypt(&sealed.bytes).await.unwrap() {
//!         DecryptOutcome::Locked(status) => println!("{}", status.message()),
//!         DecryptOutcome::Released(file) => println!("{} bytes", file.plaintext.len()),
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `timelock_vault::core` - Primitives (artifacts, signer, keys, durations)
//! - `timelock_vault::store` - Custody storage and SQLite

pub mod config;
pub mod error;
pub mod outcome;
pub mod vault;

// Re-export component crates
pub use timelock_vault_core as core;
pub use timelock_vault_store as store;

// Re-export main types for convenience
pub use config::{ConfigError, VaultConfig};
pub use error::{ErrorKind, Result, VaultError};
pub use outcome::{DecryptOutcome, LockStatus, Released, SealMetadata, Sealed};
pub use vault::Vault;

// Re-export commonly used core types
pub use timelock_vault_core::{
    Clock, EncryptTarget, KeyCustodyRecord, KeyId, LockedArtifact, ManualClock, ServerSecret,
    SystemClock, DEFAULT_DURATION,
};
