//! The locked-artifact wire format.
//!
//! A locked artifact (`.tlp` file) is a JSON object:
//!
//! ```json
//! {
//!   "v": 1,
//!   "id": "<key id>",
//!   "unlock_at": 1700000000,
//!   "unlock_iso": "2023-11-14T22:13:20+00:00",
//!   "original": "report.pdf",
//!   "nonce": "<base64, 12 bytes>",
//!   "ct": "<base64, ciphertext || 16-byte tag>",
//!   "_sig": "<32 hex chars>"
//! }
//! ```
//!
//! Field names and encodings are fixed; artifacts already in circulation must
//! keep parsing. `nonce` and `ct` use standard base64 with padding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::countdown::unlock_iso;
use crate::crypto::VaultNonce;
use crate::error::{CoreError, Result};
use crate::types::KeyId;

/// Current artifact format version.
pub const ARTIFACT_VERSION: u32 = 1;

/// File extension for locked artifacts.
pub const ARTIFACT_EXTENSION: &str = "tlp";

/// Filename assumed when an artifact carries none.
pub const DEFAULT_ORIGINAL_NAME: &str = "decrypted_file";

/// A parsed locked artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedArtifact {
    pub version: u32,
    /// Custody record id.
    pub id: KeyId,
    /// Unix seconds; signed.
    pub unlock_at: i64,
    /// Same instant as `unlock_at`, for humans.
    pub unlock_at_iso: String,
    /// Copy of the filename, readable without a server round trip.
    pub original_name: String,
    pub nonce: VaultNonce,
    /// AES-256-GCM output, tag included.
    pub ciphertext: Vec<u8>,
    /// Signer tag over `{id, unlock_at}`.
    pub signature: String,
}

/// Serialized field layout, in output order.
#[derive(Serialize)]
struct WireArtifact<'a> {
    v: u32,
    id: &'a str,
    unlock_at: i64,
    unlock_iso: &'a str,
    original: &'a str,
    nonce: String,
    ct: String,
    #[serde(rename = "_sig")]
    sig: &'a str,
}

/// Lenient input layout; presence is checked after parsing.
#[derive(Deserialize)]
struct RawArtifact {
    v: Option<u32>,
    id: Option<String>,
    unlock_at: Option<i64>,
    unlock_iso: Option<String>,
    original: Option<String>,
    nonce: Option<String>,
    ct: Option<String>,
    #[serde(rename = "_sig")]
    sig: Option<String>,
}

impl LockedArtifact {
    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let wire = WireArtifact {
            v: self.version,
            id: self.id.as_str(),
            unlock_at: self.unlock_at,
            unlock_iso: &self.unlock_at_iso,
            original: &self.original_name,
            nonce: STANDARD.encode(self.nonce.as_bytes()),
            ct: STANDARD.encode(&self.ciphertext),
            sig: &self.signature,
        };
        serde_json::to_vec(&wire).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// Parse JSON bytes.
    ///
    /// `id`, `unlock_at`, `nonce`, `ct` and `_sig` must be present and
    /// non-empty, and `unlock_at` positive. `v`, `unlock_iso` and `original`
    /// are optional; an explicit `v` must be [`ARTIFACT_VERSION`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::MalformedArtifact(format!("not valid JSON: {}", e)))?;

        let version = raw.v.unwrap_or(ARTIFACT_VERSION);
        if version != ARTIFACT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let id = required(raw.id, "id")?;
        let unlock_at = raw
            .unlock_at
            .filter(|t| *t > 0)
            .ok_or_else(|| missing("unlock_at"))?;
        let nonce_b64 = required(raw.nonce, "nonce")?;
        let ct_b64 = required(raw.ct, "ct")?;
        let signature = required(raw.sig, "_sig")?;

        let nonce_bytes = STANDARD
            .decode(nonce_b64.trim())
            .map_err(|e| CoreError::MalformedArtifact(format!("nonce is not base64: {}", e)))?;
        let nonce = VaultNonce::from_slice(&nonce_bytes)?;
        let ciphertext = STANDARD
            .decode(ct_b64.trim())
            .map_err(|e| CoreError::MalformedArtifact(format!("ct is not base64: {}", e)))?;

        Ok(Self {
            version,
            id: KeyId::new(id),
            unlock_at,
            unlock_at_iso: raw.unlock_iso.unwrap_or_else(|| unlock_iso(unlock_at)),
            original_name: raw
                .original
                .unwrap_or_else(|| DEFAULT_ORIGINAL_NAME.to_string()),
            nonce,
            ciphertext,
            signature,
        })
    }

    /// Filename a locked copy of `original` is usually saved under.
    pub fn file_name_for(original: &str) -> String {
        format!("{}.{}", original, ARTIFACT_EXTENSION)
    }
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.filter(|v| !v.is_empty()).ok_or_else(|| missing(name))
}

fn missing(name: &str) -> CoreError {
    CoreError::MalformedArtifact(format!("missing field `{}`", name))
}
