//! Vault module — the encrypted library protocol.
//!
//! This module provides:
//! - `Envelope` / `AuthenticatedEnvelope` with canonical JSON and HMAC (`envelope`)
//! - LZ4 payload compression (`compression`)
//! - The `CryptoManager` state machine (`manager`)
//! - `PasswordEntry` / `PasswordList` types used by the CLI (`entry`)
//! - Atomic file persistence (`store`)

pub mod compression;
pub mod entry;
pub mod envelope;
pub mod manager;
pub mod store;

pub use entry::{PasswordEntry, PasswordList};
pub use envelope::{AuthenticatedEnvelope, Envelope, API_VERSION};
pub use manager::{CryptoManager, INITIAL_VERSION};
pub use store::LibraryFile;
