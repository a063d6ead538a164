//! `passvault rotate-key` — change the library master password.
//!
//! Decrypts the list with the current password, then re-encrypts it
//! as the next library version under keys derived from the new one.
//! The file is only rewritten once the new envelope is complete.

use crate::cli::output;
use crate::cli::{open_library, prompt_new_password, Cli};
use crate::errors::Result;
use crate::vault::PasswordList;

/// Execute the `rotate-key` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    // 1. Open the library with the current password.
    output::info("Enter your current master password.");
    let lib = open_library(cli).await?;

    // 2. Decrypt the list into memory.
    let list: PasswordList = lib.manager.password_list().await?;

    // 3. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password("PASSVAULT_NEW_PASSWORD")?;

    // 4. Re-encrypt under the new keys and save atomically.
    let stored = lib
        .manager
        .encrypt_password_list(&list, Some(new_password.as_bytes()))
        .await?;
    lib.file.write(&stored)?;

    output::success(&format!(
        "Password rotated ({} entries re-encrypted, library version {})",
        list.len(),
        lib.manager.library_version()
    ));

    Ok(())
}
