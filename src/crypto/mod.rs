//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption bound to a library version (`encryption`)
//! - Argon2id passphrase stretching and the `KeyDerivation` seam (`kdf`)
//! - HKDF split into HMAC key, encryption key and verification hash (`keys`)
//! - CSPRNG password generation (`password`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod password;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key, Argon2Kdf, Argon2Params, KeyDerivation};
pub use keys::KeyMaterial;
pub use password::generate_random_password;
