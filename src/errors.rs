use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Protocol errors ---
    #[error("HMAC verification failed — library may be tampered or the password is wrong")]
    IntegrityCheckFailed,

    #[error("Decryption failed — wrong password, corrupted data, or version mismatch")]
    DecryptionFailed,

    #[error("Could not parse decrypted library: {0}")]
    ParseFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Envelope errors ---
    #[error("HMAC error: {0}")]
    HmacError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Library version counter exhausted")]
    VersionExhausted,

    // --- Storage errors ---
    #[error("Library not found at {0}")]
    LibraryNotFound(PathBuf),

    #[error("Library already exists at {0}")]
    LibraryAlreadyExists(PathBuf),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Coarse error category, one per failure class of the library protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Integrity,
    Decryption,
    Parse,
    Derivation,
    Encryption,
    Other,
}

impl VaultError {
    /// Classify this error into one of the protocol categories.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IntegrityCheckFailed => ErrorKind::Integrity,
            Self::DecryptionFailed => ErrorKind::Decryption,
            Self::ParseFailed(_) => ErrorKind::Parse,
            Self::KeyDerivationFailed(_) => ErrorKind::Derivation,
            Self::EncryptionFailed(_) | Self::HmacError(_) | Self::VersionExhausted => {
                ErrorKind::Encryption
            }
            _ => ErrorKind::Other,
        }
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
