//! Key material split using HKDF-SHA256.
//!
//! From a single Argon2id master key we derive:
//! - A dedicated **HMAC key** for library integrity checks.
//! - The **encryption key** for the AES-256-GCM payload.
//! - A **verification hash** that lets other components check a
//!   passphrase without decrypting anything.
//!
//! HKDF (RFC 5869) uses the master key as input keying material (IKM)
//! and a context string (`info`) to produce independent sub-keys.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{VaultError, Result};

/// Length of derived sub-keys (256 bits).
pub const KEY_LEN: usize = 32;

const HMAC_INFO: &[u8] = b"passvault-hmac-key";
const AES_INFO: &[u8] = b"passvault-aes-key";
const HASH_INFO: &[u8] = b"passvault-verification-hash";

/// Derive a sub-key from the master key for the given context string.
pub fn derive_subkey(master_key: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    // `salt` is None — HKDF will use a zero-filled salt internally.
    let hk = Hkdf::<Sha256>::new(None, master_key);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// The HMAC key, encryption key and verification hash derived from one
/// passphrase.  Key bytes are zeroed when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    hmac_key: [u8; KEY_LEN],
    encryption_key: [u8; KEY_LEN],
    verification_hash: String,
}

impl KeyMaterial {
    /// Split a stretched master key into the three components.
    pub fn from_master_key(master_key: &[u8]) -> Result<Self> {
        let hmac_key = derive_subkey(master_key, HMAC_INFO)?;
        let encryption_key = derive_subkey(master_key, AES_INFO)?;
        let mut hash_bytes = derive_subkey(master_key, HASH_INFO)?;
        let verification_hash = BASE64.encode(hash_bytes);
        hash_bytes.zeroize();

        Ok(Self {
            hmac_key,
            encryption_key,
            verification_hash,
        })
    }

    pub fn hmac_key(&self) -> &[u8; KEY_LEN] {
        &self.hmac_key
    }

    pub fn encryption_key(&self) -> &[u8; KEY_LEN] {
        &self.encryption_key
    }

    /// Base64 verification hash of the passphrase.
    pub fn verification_hash(&self) -> &str {
        &self.verification_hash
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("verification_hash", &self.verification_hash)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_independent() {
        let km = KeyMaterial::from_master_key(&[0x42u8; 32]).unwrap();
        assert_ne!(km.hmac_key(), km.encryption_key());
        assert_ne!(
            BASE64.encode(km.encryption_key()),
            km.verification_hash().to_string()
        );
    }

    #[test]
    fn debug_output_hides_keys() {
        let km = KeyMaterial::from_master_key(&[0x01u8; 32]).unwrap();
        let shown = format!("{km:?}");
        assert!(shown.contains("verification_hash"));
        assert!(!shown.contains("hmac_key"));
        assert!(!shown.contains("encryption_key"));
    }
}
