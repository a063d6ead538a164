//! `passvault init` — create a new, empty library file.

use crate::cli::output;
use crate::cli::{library_file, load_settings, prompt_new_password, Cli};
use crate::crypto::kdf::Argon2Kdf;
use crate::errors::{VaultError, Result};
use crate::vault::{CryptoManager, PasswordList};

/// Execute the `init` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let file = library_file(cli, &settings)?;

    // 1. Refuse to clobber an existing library.
    if file.exists() {
        output::tip("Use `passvault add` to add entries to the existing library.");
        return Err(VaultError::LibraryAlreadyExists(file.path().to_path_buf()));
    }

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password("PASSVAULT_PASSWORD")?;

    // 3. Encrypt an empty list and persist it.
    let kdf = Argon2Kdf::new(settings.argon2_params());
    let (manager, stored) =
        CryptoManager::create_with_kdf(kdf, password.as_bytes(), &PasswordList::new()).await?;
    file.create(&stored)?;

    output::success(&format!(
        "Library created at {} (version {})",
        file.path().display(),
        manager.library_version()
    ));
    output::tip("Run `passvault add <TITLE>` to add an entry.");
    output::tip("Run `passvault list` to see all entries.");

    Ok(())
}
