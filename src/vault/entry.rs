//! The password list stored inside a library.
//!
//! `CryptoManager` works with any serde type; the CLI uses
//! `PasswordList` so entries have a stable shape on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single login stored in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    /// Unique, human-chosen name (e.g. "github").
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Ordered collection of entries, keyed by title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordList {
    entries: Vec<PasswordEntry>,
}

impl PasswordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PasswordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&PasswordEntry> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// Insert a new entry or replace the password/fields of an existing one.
    ///
    /// An update keeps the original `created_at`.  Entries stay sorted by title.
    pub fn upsert(
        &mut self,
        title: &str,
        username: Option<String>,
        password: String,
        url: Option<String>,
        notes: Option<String>,
    ) {
        let now = Utc::now();
        match self.entries.iter_mut().find(|e| e.title == title) {
            Some(existing) => {
                existing.username = username;
                existing.password = password;
                existing.url = url;
                existing.notes = notes;
                existing.updated_at = now;
            }
            None => {
                self.entries.push(PasswordEntry {
                    title: title.to_string(),
                    username,
                    password,
                    url,
                    notes,
                    created_at: now,
                    updated_at: now,
                });
                self.entries.sort_by(|a, b| a.title.cmp(&b.title));
            }
        }
    }

    /// Remove an entry by title, returning it.
    pub fn remove(&mut self, title: &str) -> Option<PasswordEntry> {
        let idx = self.entries.iter().position(|e| e.title == title)?;
        Some(self.entries.remove(idx))
    }
}
