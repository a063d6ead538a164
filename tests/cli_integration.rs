//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords are supplied through `PASSVAULT_*` env vars and a
//! `.passvault.toml` with cheap Argon2 params keeps each run fast.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const FAST_CONFIG: &str = "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

/// Temp dir with a fast config and an initialized library.
fn initialized(password: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".passvault.toml").write_str(FAST_CONFIG).unwrap();

    passvault()
        .arg("init")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", password)
        .assert()
        .success()
        .stdout(predicate::str::contains("version 0"));

    tmp
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted, versioned password library"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("rotate-key"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("hash"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_respects_length_and_alphabet() {
    passvault()
        .args(["generate", "--length", "24", "--alphabet", "ab"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[ab]{24}\n$").unwrap());
}

#[test]
fn get_on_missing_library_fails() {
    let tmp = TempDir::new().unwrap();

    passvault()
        .args(["get", "github"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "whatever-pass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Library not found"));
}

#[test]
fn init_twice_fails() {
    let tmp = initialized("correct-horse");

    passvault()
        .arg("init")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn add_get_remove_flow() {
    let tmp = initialized("correct-horse");

    passvault()
        .args(["add", "github", "--username", "octo"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .env("PASSVAULT_ENTRY_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("library version 1"));

    passvault()
        .args(["get", "github"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success()
        .stdout("hunter2\n");

    passvault()
        .arg("list")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo"))
        .stdout(predicate::str::contains("hunter2").not());

    passvault()
        .args(["remove", "github", "--force"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success()
        .stdout(predicate::str::contains("library version 2"));

    passvault()
        .args(["get", "github"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = initialized("correct-horse");

    passvault()
        .arg("list")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "wrong-horse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HMAC verification failed"));
}

#[test]
fn rotate_key_changes_hash_and_password() {
    let tmp = initialized("correct-horse");

    let before = passvault()
        .arg("hash")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    passvault()
        .arg("rotate-key")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .env("PASSVAULT_NEW_PASSWORD", "battery-staple")
        .assert()
        .success()
        .stdout(predicate::str::contains("library version 1"));

    passvault()
        .arg("list")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .failure();

    let after = passvault()
        .arg("hash")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "battery-staple")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_ne!(before, after);
}

#[test]
fn status_shows_versions() {
    let tmp = initialized("correct-horse");

    passvault()
        .arg("status")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success()
        .stdout(predicate::str::contains("Library version: 0"))
        .stdout(predicate::str::contains("API version:     2"));
}

#[test]
fn library_flag_overrides_settings() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".passvault.toml").write_str(FAST_CONFIG).unwrap();

    passvault()
        .args(["init", "--library", "other.json"])
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "correct-horse")
        .assert()
        .success();

    tmp.child("other.json").assert(predicate::path::exists());
    tmp.child("library.json").assert(predicate::path::missing());
}
