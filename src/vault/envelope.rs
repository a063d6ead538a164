//! Library envelope, canonical serialization and HMAC integrity.
//!
//! An envelope is exchanged with storage as two strings:
//!
//! ```text
//! { "library": "<canonical envelope JSON>", "hmac": "<base64 HMAC-SHA256>" }
//! ```
//!
//! The canonical envelope JSON is:
//!
//! ```text
//! {"blob":"<base64 ciphertext>","library_version":N,"api_version":2,"modified":<unix secs>}
//! ```
//!
//! The HMAC is always computed and verified over the exact `library`
//! string, never over a re-serialization, so both sides see the same bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::{VaultError, Result};

/// Schema revision written by this implementation.
pub const API_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The versioned wrapper around an encrypted password list.
///
/// Field order is part of the canonical form; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Encrypted, compressed password list (base64 in JSON).
    #[serde(
        rename = "blob",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub ciphertext: Vec<u8>,

    /// Monotonic counter; also parameterizes the cipher nonce.
    pub library_version: u64,

    /// Schema revision of the producer.
    pub api_version: u32,

    /// Unix timestamp (seconds) of creation.
    #[serde(rename = "modified")]
    pub modified_at: i64,
}

impl Envelope {
    /// Build an envelope stamped with the current time and `API_VERSION`.
    pub fn new(ciphertext: Vec<u8>, library_version: u64) -> Self {
        Self {
            ciphertext,
            library_version,
            api_version: API_VERSION,
            modified_at: Utc::now().timestamp(),
        }
    }

    /// Serialize to the canonical JSON string used for both MAC and storage.
    pub fn to_canonical_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| VaultError::SerializationError(format!("envelope: {e}")))
    }

    /// Parse an envelope from its canonical JSON.
    ///
    /// Only call this on a string whose MAC has already been verified.
    pub fn from_canonical_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| VaultError::ParseFailed(format!("envelope: {e}")))
    }
}

// ---------------------------------------------------------------------------
// AuthenticatedEnvelope
// ---------------------------------------------------------------------------

/// A serialized envelope paired with its MAC, as exchanged with storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedEnvelope {
    /// Canonical envelope JSON.
    #[serde(rename = "library")]
    pub envelope: String,

    /// Base64 HMAC-SHA256 over `envelope`.
    #[serde(rename = "hmac")]
    pub mac: String,
}

impl AuthenticatedEnvelope {
    /// Serialize `envelope` and sign it with `hmac_key`.
    pub fn seal(envelope: &Envelope, hmac_key: &[u8]) -> Result<Self> {
        let json = envelope.to_canonical_json()?;
        let tag = compute_hmac(hmac_key, json.as_bytes())?;
        Ok(Self {
            envelope: json,
            mac: BASE64.encode(tag),
        })
    }

    /// Verify the MAC, then parse the envelope.
    ///
    /// Nothing inside the envelope is read before the MAC checks out.
    pub fn open(&self, hmac_key: &[u8]) -> Result<Envelope> {
        let expected = BASE64
            .decode(&self.mac)
            .map_err(|_| VaultError::IntegrityCheckFailed)?;
        verify_hmac(hmac_key, self.envelope.as_bytes(), &expected)?;
        Envelope::from_canonical_json(&self.envelope)
    }
}

// ---------------------------------------------------------------------------
// HMAC
// ---------------------------------------------------------------------------

/// Compute HMAC-SHA256 over `data`.
pub fn compute_hmac(hmac_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| VaultError::HmacError(format!("invalid HMAC key: {e}")))?;

    mac.update(data);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify that the HMAC matches using constant-time comparison.
pub fn verify_hmac(hmac_key: &[u8], data: &[u8], expected_hmac: &[u8]) -> Result<()> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| VaultError::HmacError(format!("invalid HMAC key: {e}")))?;

    mac.update(data);

    mac.verify_slice(expected_hmac)
        .map_err(|_| VaultError::IntegrityCheckFailed)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
