//! In-memory implementation of the VaultStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use timelock_vault_core::{KeyCustodyRecord, KeyId};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, VaultStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<KeyId, KeyCustodyRecord>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

#[async_trait]
impl VaultStore for MemoryStore {
    async fn put(&self, record: &KeyCustodyRecord) -> Result<InsertResult> {
        let mut records = self.records.write().map_err(poisoned)?;

        match records.entry(record.id.clone()) {
            Entry::Occupied(_) => Ok(InsertResult::DuplicateId),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(InsertResult::Inserted)
            }
        }
    }

    async fn get(&self, id: &KeyId) -> Result<Option<KeyCustodyRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len() as u64)
    }
}
