//! `passvault remove` — drop an entry and re-encrypt the library.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_library, Cli};
use crate::errors::{VaultError, Result};
use crate::vault::PasswordList;

/// Execute the `remove` command.
pub async fn execute(cli: &Cli, title: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove entry '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let lib = open_library(cli).await?;
    let mut list: PasswordList = lib.manager.password_list().await?;

    if list.remove(title).is_none() {
        return Err(VaultError::EntryNotFound(title.to_string()));
    }

    let stored = lib.manager.encrypt_password_list(&list, None).await?;
    lib.file.write(&stored)?;

    output::success(&format!(
        "Removed entry '{title}' (library version {})",
        lib.manager.library_version()
    ));

    Ok(())
}
