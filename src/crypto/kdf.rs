//! Passphrase-based key derivation using Argon2id.
//!
//! Argon2id stretches the master passphrase into a 32-byte master key,
//! which `keys` then splits into the HMAC key, the encryption key and
//! the verification hash.  Parameters are configurable via
//! `Argon2Params` (loaded from `.passvault.toml` or sensible defaults).
//!
//! The derivation is a pure function of the passphrase: the salt is a
//! fixed application constant, so two derivations of the same
//! passphrase always agree without storing anything per library.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use super::keys::KeyMaterial;
use crate::errors::{VaultError, Result};

/// Length of the derived master key in bytes (256 bits).
const KEY_LEN: usize = 32;

/// Application-wide Argon2 salt.
pub const LIBRARY_SALT: &[u8] = b"passvault-library-salt-v2";

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Stretch `passphrase` into a 32-byte master key with explicit params.
///
/// Enforces minimum Argon2 parameters to prevent dangerously weak KDF settings.
pub fn derive_master_key(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(VaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| VaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase, salt, key.as_mut())
        .map_err(|e| VaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Turns a passphrase into a complete set of key material.
///
/// Implementations must derive all three components from one call so
/// an HMAC key is never paired with an encryption key from another
/// passphrase.
#[async_trait]
pub trait KeyDerivation: Send + Sync {
    async fn derive(&self, passphrase: &[u8]) -> Result<KeyMaterial>;
}

/// Default `KeyDerivation`: Argon2id followed by the HKDF split.
///
/// Argon2 is CPU- and memory-bound, so it runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2Kdf {
    params: Argon2Params,
}

impl Argon2Kdf {
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }
}

#[async_trait]
impl KeyDerivation for Argon2Kdf {
    async fn derive(&self, passphrase: &[u8]) -> Result<KeyMaterial> {
        let passphrase = Zeroizing::new(passphrase.to_vec());
        let params = self.params;

        debug!(
            memory_kib = params.memory_kib,
            iterations = params.iterations,
            parallelism = params.parallelism,
            "deriving key material"
        );

        tokio::task::spawn_blocking(move || {
            let master = derive_master_key(&passphrase, LIBRARY_SALT, &params)?;
            KeyMaterial::from_master_key(master.as_slice())
        })
        .await
        .map_err(|e| VaultError::KeyDerivationFailed(format!("derivation task failed: {e}")))?
    }
}
