//! Integration tests for library file persistence.

use std::fs;

use passvault::crypto::{Argon2Kdf, Argon2Params};
use passvault::errors::VaultError;
use passvault::vault::{CryptoManager, LibraryFile, PasswordList};
use tempfile::TempDir;

fn kdf() -> Argon2Kdf {
    Argon2Kdf::new(Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    })
}

/// Helper: a library file path inside a fresh temp dir.
fn library_file() -> (TempDir, LibraryFile) {
    let dir = TempDir::new().expect("create temp dir");
    let file = LibraryFile::new(dir.path().join("library.json"));
    (dir, file)
}

#[tokio::test]
async fn create_write_and_reopen_from_disk() {
    let (_dir, file) = library_file();

    let (manager, stored) = CryptoManager::create_with_kdf(kdf(), b"disk-pass", &PasswordList::new())
        .await
        .unwrap();
    file.create(&stored).unwrap();

    let mut list = PasswordList::new();
    list.upsert("bank", Some("me".into()), "1234".into(), None, Some("pin".into()));
    let stored = manager.encrypt_password_list(&list, None).await.unwrap();
    file.write(&stored).unwrap();

    let on_disk = file.read().unwrap();
    assert_eq!(on_disk, stored);

    let reopened = CryptoManager::open_with_kdf(kdf(), b"disk-pass", &on_disk)
        .await
        .unwrap();
    assert_eq!(reopened.library_version(), 1);
    let back: PasswordList = reopened.password_list().await.unwrap();
    assert_eq!(back, list);
}

#[tokio::test]
async fn create_refuses_to_overwrite() {
    let (_dir, file) = library_file();
    let (_, stored) = CryptoManager::create_with_kdf(kdf(), b"pw", &PasswordList::new())
        .await
        .unwrap();

    file.create(&stored).unwrap();
    let err = file.create(&stored).unwrap_err();
    assert!(matches!(err, VaultError::LibraryAlreadyExists(_)));
}

#[test]
fn read_missing_file_fails() {
    let (_dir, file) = library_file();
    assert!(matches!(file.read(), Err(VaultError::LibraryNotFound(_))));
}

#[test]
fn read_garbage_file_fails() {
    let (_dir, file) = library_file();
    fs::write(file.path(), b"{ not json").unwrap();
    assert!(matches!(
        file.read(),
        Err(VaultError::SerializationError(_))
    ));
}

#[tokio::test]
async fn write_leaves_no_temp_file_and_creates_parent() {
    let dir = TempDir::new().unwrap();
    let file = LibraryFile::new(dir.path().join("nested").join("lib.json"));
    let (_, stored) = CryptoManager::create_with_kdf(kdf(), b"pw", &PasswordList::new())
        .await
        .unwrap();

    file.write(&stored).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["lib.json"]);
}

#[tokio::test]
async fn file_uses_library_and_hmac_fields() {
    let (_dir, file) = library_file();
    let (_, stored) = CryptoManager::create_with_kdf(kdf(), b"pw", &PasswordList::new())
        .await
        .unwrap();
    file.write(&stored).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&fs::read(file.path()).unwrap()).unwrap();
    let library = raw["library"].as_str().expect("library is a string");
    assert!(library.starts_with(r#"{"blob":""#));
    assert!(raw["hmac"].is_string());
}
