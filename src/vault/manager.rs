//! `CryptoManager` — the library protocol.
//!
//! Sequences key derivation, integrity verification, version
//! management and re-encryption.  A manager only exists once its
//! stored envelope has been verified: construction either yields a
//! ready manager or fails, so there is no half-open state to query.
//!
//! Committed state (keys + envelope) lives in one immutable
//! `Snapshot` behind an `ArcSwap`.  Readers load the current snapshot
//! without locking.  Writers hold `write_lock` for the whole
//! read-modify-write, build the next snapshot off to the side, and
//! swap it in only after every step has succeeded.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::compression;
use super::envelope::{AuthenticatedEnvelope, Envelope, API_VERSION};
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{Argon2Kdf, KeyDerivation};
use crate::crypto::keys::KeyMaterial;
use crate::errors::{VaultError, Result};

/// Version assigned to a freshly created library.
pub const INITIAL_VERSION: u64 = 0;

/// Everything a read needs, committed together.
struct Snapshot {
    keys: Arc<KeyMaterial>,
    envelope: Envelope,
}

/// Holds the active key material and verified envelope of one library.
pub struct CryptoManager<K = Argon2Kdf> {
    kdf: K,
    state: ArcSwap<Snapshot>,
    write_lock: Mutex<()>,
}

impl CryptoManager<Argon2Kdf> {
    /// Open a stored library with the default Argon2id parameters.
    pub async fn open(passphrase: &[u8], stored: &AuthenticatedEnvelope) -> Result<Self> {
        Self::open_with_kdf(Argon2Kdf::default(), passphrase, stored).await
    }

    /// Create a new library with the default Argon2id parameters.
    pub async fn create<T>(passphrase: &[u8], list: &T) -> Result<(Self, AuthenticatedEnvelope)>
    where
        T: Serialize + ?Sized,
    {
        Self::create_with_kdf(Argon2Kdf::default(), passphrase, list).await
    }
}

impl<K: KeyDerivation> CryptoManager<K> {
    /// Derive keys from `passphrase` and verify `stored` against them.
    ///
    /// Fails with `IntegrityCheckFailed` if the MAC does not match; the
    /// envelope is never parsed in that case.
    pub async fn open_with_kdf(
        kdf: K,
        passphrase: &[u8],
        stored: &AuthenticatedEnvelope,
    ) -> Result<Self> {
        let keys = kdf.derive(passphrase).await?;

        let envelope = stored.open(keys.hmac_key()).inspect_err(|e| {
            if matches!(e, VaultError::IntegrityCheckFailed) {
                warn!("stored library failed HMAC verification");
            }
        })?;
        check_api_version(&envelope)?;

        info!(
            library_version = envelope.library_version,
            api_version = envelope.api_version,
            "library verified"
        );

        Ok(Self::from_snapshot(
            kdf,
            Snapshot {
                keys: Arc::new(keys),
                envelope,
            },
        ))
    }

    /// Mint a brand-new library at `INITIAL_VERSION` holding `list`.
    ///
    /// Returns the manager and the authenticated envelope to persist.
    pub async fn create_with_kdf<T>(
        kdf: K,
        passphrase: &[u8],
        list: &T,
    ) -> Result<(Self, AuthenticatedEnvelope)>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = serialize_list(list)?;
        let keys = Arc::new(kdf.derive(passphrase).await?);
        let (envelope, authenticated) = seal(Arc::clone(&keys), plaintext, INITIAL_VERSION).await?;

        info!(library_version = INITIAL_VERSION, "library created");

        Ok((
            Self::from_snapshot(kdf, Snapshot { keys, envelope }),
            authenticated,
        ))
    }

    fn from_snapshot(kdf: K, snapshot: Snapshot) -> Self {
        Self {
            kdf,
            state: ArcSwap::from_pointee(snapshot),
            write_lock: Mutex::new(()),
        }
    }

    /// Decrypt, decompress and deserialize the current password list.
    ///
    /// Read-only; concurrent calls each see one committed snapshot.
    pub async fn password_list<T: DeserializeOwned>(&self) -> Result<T> {
        let snapshot = self.state.load_full();
        let version = snapshot.envelope.library_version;

        let plaintext = tokio::task::spawn_blocking(move || open_payload(&snapshot))
            .await
            .map_err(decryption_task_failed)??;

        debug!(
            library_version = version,
            bytes = plaintext.len(),
            "password list decrypted"
        );

        serde_json::from_slice(&plaintext)
            .map_err(|e| VaultError::ParseFailed(format!("password list: {e}")))
    }

    /// Encrypt `list` as the next library version, optionally rotating keys.
    ///
    /// Writes are serialized: each call sees the version committed by
    /// the previous one.  On any failure the committed keys, envelope
    /// and version are left exactly as they were.
    pub async fn encrypt_password_list<T>(
        &self,
        list: &T,
        new_passphrase: Option<&[u8]>,
    ) -> Result<AuthenticatedEnvelope>
    where
        T: Serialize + ?Sized,
    {
        let _guard = self.write_lock.lock().await;

        let current = self.state.load_full();
        let next_version = current
            .envelope
            .library_version
            .checked_add(1)
            .ok_or(VaultError::VersionExhausted)?;

        let plaintext = serialize_list(list)?;

        let rotated = new_passphrase.is_some();
        let keys = match new_passphrase {
            Some(passphrase) => Arc::new(self.kdf.derive(passphrase).await?),
            None => Arc::clone(&current.keys),
        };

        let (envelope, authenticated) = seal(Arc::clone(&keys), plaintext, next_version).await?;

        self.state.store(Arc::new(Snapshot { keys, envelope }));

        info!(library_version = next_version, rotated, "library committed");
        Ok(authenticated)
    }

    /// Verification hash of the active key material.
    pub fn hash(&self) -> String {
        self.state.load().keys.verification_hash().to_string()
    }

    /// Version of the committed envelope.
    pub fn library_version(&self) -> u64 {
        self.state.load().envelope.library_version
    }

    /// Copy of the committed envelope.
    pub fn envelope(&self) -> Envelope {
        self.state.load().envelope.clone()
    }
}

fn check_api_version(envelope: &Envelope) -> Result<()> {
    if envelope.api_version > API_VERSION {
        return Err(VaultError::ParseFailed(format!(
            "unsupported api_version {} (newest supported is {API_VERSION})",
            envelope.api_version
        )));
    }
    if envelope.api_version < API_VERSION {
        warn!(
            api_version = envelope.api_version,
            current = API_VERSION,
            "library written by an older schema revision"
        );
    }
    Ok(())
}

fn serialize_list<T: Serialize + ?Sized>(list: &T) -> Result<Zeroizing<Vec<u8>>> {
    serde_json::to_vec(list)
        .map(Zeroizing::new)
        .map_err(|e| VaultError::SerializationError(format!("password list: {e}")))
}

/// Compress, encrypt and MAC `plaintext` as library `version`.
async fn seal(
    keys: Arc<KeyMaterial>,
    plaintext: Zeroizing<Vec<u8>>,
    version: u64,
) -> Result<(Envelope, AuthenticatedEnvelope)> {
    tokio::task::spawn_blocking(move || {
        let compressed = Zeroizing::new(compression::compress(&plaintext));
        let ciphertext = encrypt(keys.encryption_key(), &compressed, version)?;

        debug!(
            library_version = version,
            plaintext_bytes = plaintext.len(),
            ciphertext_bytes = ciphertext.len(),
            "password list encrypted"
        );

        let envelope = Envelope::new(ciphertext, version);
        let authenticated = AuthenticatedEnvelope::seal(&envelope, keys.hmac_key())?;
        Ok((envelope, authenticated))
    })
    .await
    .map_err(encryption_task_failed)?
}

fn encryption_task_failed(e: JoinError) -> VaultError {
    VaultError::EncryptionFailed(format!("encryption task: {e}"))
}

fn decryption_task_failed(e: JoinError) -> VaultError {
    warn!(error = %e, "decryption task failed");
    VaultError::DecryptionFailed
}

fn open_payload(snapshot: &Snapshot) -> Result<Zeroizing<Vec<u8>>> {
    let envelope = &snapshot.envelope;
    let compressed = Zeroizing::new(decrypt(
        snapshot.keys.encryption_key(),
        &envelope.ciphertext,
        envelope.library_version,
    )?);
    compression::decompress(&compressed).map(Zeroizing::new)
}
