//! # Timelock Vault Testkit
//!
//! Testing utilities for the Timelock Vault.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known signatures and a known artifact that any
//!   compatible implementation must reproduce or accept
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Vaults over memory or SQLite stores with a manual clock
//!
//! ## Golden Vectors
//!
//! ```rust
//! use timelock_vault_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use timelock_vault_testkit::generators::SealParams;
//!
//! proptest! {
//!     #[test]
//!     fn round_trip(params: SealParams) {
//!         // encrypt, advance the clock, decrypt
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use timelock_vault_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::new();
//!     let sealed = fixture.vault.encrypt(b"data", "1h", "a.txt").await.unwrap();
//!     fixture.advance(3_600);
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, SqliteFixture, TestFixture, FIXTURE_START, TEST_SECRET};
pub use generators::SealParams;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
