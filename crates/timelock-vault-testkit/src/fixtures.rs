//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use timelock_vault::{Clock, ManualClock, ServerSecret, Vault, VaultConfig};
use timelock_vault_store::{MemoryStore, SqliteStore};

/// Secret shared by all fixtures unless overridden.
pub const TEST_SECRET: &str = "testkit-secret";

/// Fixture clocks start here (2023-11-14T22:13:20Z).
pub const FIXTURE_START: i64 = 1_700_000_000;

/// Plaintext limit for fixtures.
pub const FIXTURE_MAX_BYTES: usize = 64 * 1024;

fn config(secret: &str) -> VaultConfig {
    let secret = ServerSecret::new(secret).expect("fixture secret is non-empty");
    VaultConfig::default()
        .with_secret(secret)
        .with_max_bytes(FIXTURE_MAX_BYTES)
}

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A vault over a memory store with a manual clock.
pub struct TestFixture {
    pub vault: Vault<MemoryStore, ManualClock>,
}

impl TestFixture {
    /// Create a fixture using [`TEST_SECRET`].
    pub fn new() -> Self {
        Self::with_secret(TEST_SECRET)
    }

    /// Create a fixture signing with a different secret.
    pub fn with_secret(secret: &str) -> Self {
        Self {
            vault: Vault::with_clock(
                MemoryStore::new(),
                ManualClock::new(FIXTURE_START),
                config(secret),
            ),
        }
    }

    /// Current fixture time.
    pub fn now(&self) -> i64 {
        self.vault.clock().now()
    }

    /// Move the fixture clock forward.
    pub fn advance(&self, seconds: i64) {
        self.vault.clock().advance(seconds);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A vault over a SQLite file in a temporary directory.
pub struct SqliteFixture {
    pub vault: Vault<SqliteStore, ManualClock>,
    path: PathBuf,
    _dir: TempDir,
}

impl SqliteFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("vault.db");
        let store = SqliteStore::open(&path).expect("open sqlite store");
        Self {
            vault: Vault::with_clock(store, ManualClock::new(FIXTURE_START), config(TEST_SECRET)),
            path,
            _dir: dir,
        }
    }

    /// Open a second vault on the same database file, as a restarted
    /// process would, with its clock set to the fixture's current time.
    pub fn reopen(&self) -> Vault<SqliteStore, ManualClock> {
        let store = SqliteStore::open(&self.path).expect("reopen sqlite store");
        let clock = ManualClock::new(self.vault.clock().now());
        Vault::with_clock(store, clock, config(TEST_SECRET))
    }

    /// Move the fixture clock forward.
    pub fn advance(&self, seconds: i64) {
        self.vault.clock().advance(seconds);
    }
}

impl Default for SqliteFixture {
    fn default() -> Self {
        Self::new()
    }
}
