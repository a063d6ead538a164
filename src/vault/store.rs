//! File persistence for an authenticated library.
//!
//! The file holds the storage form of an `AuthenticatedEnvelope`:
//! `{"library": "...", "hmac": "..."}`.  Integrity is checked by
//! `CryptoManager` when the library is opened, not here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::envelope::AuthenticatedEnvelope;
use crate::errors::{VaultError, Result};

/// A library file on disk.
#[derive(Debug, Clone)]
pub struct LibraryFile {
    path: PathBuf,
}

impl LibraryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored library.  The contents are still untrusted.
    pub fn read(&self) -> Result<AuthenticatedEnvelope> {
        if !self.path.exists() {
            return Err(VaultError::LibraryNotFound(self.path.clone()));
        }

        let data = fs::read(&self.path)?;
        serde_json::from_slice(&data).map_err(|e| {
            VaultError::SerializationError(format!("{}: {e}", self.path.display()))
        })
    }

    /// Write a library file to disk **atomically**.
    ///
    /// Writes to a temp file in the same directory, then renames it over
    /// the target so readers never see a half-written file.
    pub fn write(&self, library: &AuthenticatedEnvelope) -> Result<()> {
        let data = serde_json::to_vec_pretty(library)
            .map_err(|e| VaultError::SerializationError(format!("library: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), bytes = data.len(), "library written");
        Ok(())
    }

    /// Write a brand-new library, refusing to overwrite an existing one.
    pub fn create(&self, library: &AuthenticatedEnvelope) -> Result<()> {
        if self.path.exists() {
            return Err(VaultError::LibraryAlreadyExists(self.path.clone()));
        }
        self.write(library)
    }
}
