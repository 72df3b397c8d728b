//! VaultStore trait: the abstract interface for custody record persistence.
//!
//! This trait allows the vault to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use timelock_vault_core::{KeyCustodyRecord, KeyId};

use crate::error::Result;

/// Result of inserting a custody record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with this id already exists; nothing was written.
    DuplicateId,
}

/// The VaultStore trait: async interface for custody records.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Append-only**: there is no update or delete. A record's key and
///   unlock time are fixed from the moment it is stored.
/// - **Insert-if-absent**: `put` never overwrites. An id collision is
///   reported as `DuplicateId`, which callers treat as fatal.
/// - **Read-after-write**: a `get` that follows a successful `put` sees the
///   record.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Insert a new custody record.
    async fn put(&self, record: &KeyCustodyRecord) -> Result<InsertResult>;

    /// Get a custody record by id.
    async fn get(&self, id: &KeyId) -> Result<Option<KeyCustodyRecord>>;

    /// Number of records held.
    async fn count(&self) -> Result<u64>;
}

#[async_trait]
impl<S: VaultStore + ?Sized> VaultStore for std::sync::Arc<S> {
    async fn put(&self, record: &KeyCustodyRecord) -> Result<InsertResult> {
        (**self).put(record).await
    }

    async fn get(&self, id: &KeyId) -> Result<Option<KeyCustodyRecord>> {
        (**self).get(id).await
    }

    async fn count(&self) -> Result<u64> {
        (**self).count().await
    }
}
