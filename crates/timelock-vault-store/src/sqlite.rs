//! SQLite implementation of the VaultStore trait.
//!
//! This is the primary storage backend for the Timelock Vault. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use timelock_vault_core::{KeyCustodyRecord, KeyId, VaultKey};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertResult, VaultStore};

/// How long a statement waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened vault store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

// Helper to convert a row to a custody record
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, Vec<u8>, i64, i64, String)> {
    Ok((
        row.get("id")?,
        row.get("aes_key")?,
        row.get("unlock_at")?,
        row.get("created_at")?,
        row.get("original")?,
    ))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl VaultStore for SqliteStore {
    async fn put(&self, record: &KeyCustodyRecord) -> Result<InsertResult> {
        let record = record.clone();

        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO vault (id, aes_key, unlock_at, created_at, original)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id.as_str(),
                    record.key.as_bytes().as_slice(),
                    record.unlock_at,
                    record.created_at,
                    record.original_name,
                ],
            );

            match inserted {
                Ok(_) => Ok(InsertResult::Inserted),
                Err(e) if is_unique_violation(&e) => Ok(InsertResult::DuplicateId),
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn get(&self, id: &KeyId) -> Result<Option<KeyCustodyRecord>> {
        let id = id.clone();

        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    "SELECT id, aes_key, unlock_at, created_at, original
                     FROM vault WHERE id = ?1",
                    params![id.as_str()],
                    row_to_record,
                )
                .optional()?;

            let Some((id, key_bytes, unlock_at, created_at, original_name)) = row else {
                return Ok(None);
            };

            let key = VaultKey::from_slice(&key_bytes)
                .map_err(|e| StoreError::InvalidData(format!("record {}: {}", id, e)))?;

            Ok(Some(KeyCustodyRecord {
                id: KeyId::new(id),
                key,
                unlock_at,
                created_at,
                original_name,
            }))
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM vault", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}
