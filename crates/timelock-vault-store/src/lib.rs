//! # Timelock Vault Store
//!
//! Key custody storage for the Timelock Vault. Provides a trait-based
//! interface for custody record persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store abstracts custody records behind the [`VaultStore`] trait, so
//! the vault does not care which engine holds its keys. The primary
//! implementation is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timelock_vault_store::{SqliteStore, VaultStore, InsertResult};
//! use timelock_vault_core::KeyId;
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("vault.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     // Look a record up
//!     let record = store.get(&KeyId::new("some-id")).await.unwrap();
//!     assert!(record.is_none());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Append-only**: records are inserted and read; never updated or deleted
//! - **Insert-if-absent**: a second record under an existing id returns
//!   [`InsertResult::DuplicateId`] and leaves the first one untouched
//! - **Durable**: the SQLite store is the only copy of each key

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, VaultStore};
