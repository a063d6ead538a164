//! AES-256-GCM authenticated encryption, parameterized by library version.
//!
//! The nonce is built from 4 random bytes followed by the library
//! version as a big-endian u64, so two different versions can never
//! share a nonce under the same key.  The version is also bound as
//! associated data: decrypting under any other version fails.
//!
//! Layout of the returned byte buffer:
//!   [ 4-byte random | 8-byte version | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

use crate::errors::{VaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Random prefix of the nonce.
const NONCE_RANDOM_LEN: usize = 4;

/// Encrypt `plaintext` with a 32-byte `key` for library `version`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8], version: u64) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce_bytes = version_nonce(version);
    let nonce = Nonce::from_slice(&nonce_bytes);
    let aad = version.to_be_bytes();

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt` for the same `version`.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8], version: u64) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);

    // The embedded version must match the one the caller expects.
    if nonce_bytes[NONCE_RANDOM_LEN..] != version.to_be_bytes() {
        return Err(VaultError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::DecryptionFailed)?;
    let aad = version.to_be_bytes();

    cipher
        .decrypt(
            Nonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| VaultError::DecryptionFailed)
}

fn version_nonce(version: u64) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce[..NONCE_RANDOM_LEN]);
    nonce[NONCE_RANDOM_LEN..].copy_from_slice(&version.to_be_bytes());
    nonce
}
