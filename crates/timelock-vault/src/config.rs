//! Vault configuration.
//!
//! Built once at startup and handed to [`crate::Vault`]. The signing secret
//! lives here rather than in a global, so every vault instance carries the
//! secret it was constructed with.

use std::path::PathBuf;

use thiserror::Error;
use timelock_vault_core::{CoreError, ServerSecret};

/// Default custody database path.
pub const DEFAULT_DB_PATH: &str = "vault.db";

/// Default plaintext size limit in MiB.
pub const DEFAULT_MAX_MB: usize = 100;

/// Errors building a [`VaultConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid MAX_MB value '{0}': expected a positive integer")]
    InvalidMaxSize(String),

    #[error("invalid SERVER_SECRET: {0}")]
    InvalidSecret(#[from] CoreError),
}

/// Configuration for the Vault.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// SQLite custody database location.
    pub db_path: PathBuf,
    /// Largest plaintext accepted by encrypt, in bytes.
    pub max_bytes: usize,
    /// Signing secret. Must stay the same for as long as the database lives,
    /// or every existing artifact fails its integrity check.
    pub secret: ServerSecret,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_bytes: DEFAULT_MAX_MB * 1024 * 1024,
            secret: ServerSecret::generate(),
        }
    }
}

impl VaultConfig {
    /// Read `DB_PATH`, `MAX_MB` and `SERVER_SECRET` from the environment.
    ///
    /// Unset variables fall back to the defaults; an unset secret is
    /// generated, which invalidates artifacts across restarts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`VaultConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("MAX_MB") {
            let mb: usize = raw
                .trim()
                .parse()
                .ok()
                .filter(|mb| *mb > 0)
                .ok_or_else(|| ConfigError::InvalidMaxSize(raw.clone()))?;
            config.max_bytes = mb
                .checked_mul(1024 * 1024)
                .ok_or(ConfigError::InvalidMaxSize(raw))?;
        }

        match lookup("SERVER_SECRET") {
            Some(secret) => config.secret = ServerSecret::new(secret)?,
            None => tracing::warn!(
                "SERVER_SECRET not set; generated a per-process secret, \
                 artifacts will not verify after a restart"
            ),
        }

        Ok(config)
    }

    /// Builder-style override of the size limit.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Builder-style override of the secret.
    pub fn with_secret(mut self, secret: ServerSecret) -> Self {
        self.secret = secret;
        self
    }
}
