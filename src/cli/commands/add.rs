//! `passvault add` — add or update an entry and re-encrypt the library.

use crate::cli::output;
use crate::cli::{open_library, Cli};
use crate::crypto::password::generate_random_password;
use crate::errors::{VaultError, Result};
use crate::vault::PasswordList;

/// Fields of the entry being added.
pub struct NewEntry<'a> {
    pub title: &'a str,
    pub username: Option<&'a str>,
    pub url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub async fn execute(cli: &Cli, entry: NewEntry<'_>) -> Result<()> {
    if entry.title.trim().is_empty() {
        return Err(VaultError::CommandFailed("entry title cannot be empty".into()));
    }

    let lib = open_library(cli).await?;
    let mut list: PasswordList = lib.manager.password_list().await?;

    let password = if entry.generate {
        generate_random_password(Some(lib.settings.password_length), None)?
    } else {
        prompt_entry_password(entry.title)?
    };

    let existed = list.get(entry.title).is_some();
    list.upsert(
        entry.title,
        entry.username.map(str::to_string),
        password,
        entry.url.map(str::to_string),
        entry.notes.map(str::to_string),
    );

    let stored = lib.manager.encrypt_password_list(&list, None).await?;
    lib.file.write(&stored)?;

    let verb = if existed { "Updated" } else { "Added" };
    output::success(&format!(
        "{verb} '{}' (library version {})",
        entry.title,
        lib.manager.library_version()
    ));
    if entry.generate {
        output::tip(&format!("Run `passvault get {}` to see it.", entry.title));
    }

    Ok(())
}

fn prompt_entry_password(title: &str) -> Result<String> {
    if let Ok(pw) = std::env::var("PASSVAULT_ENTRY_PASSWORD") {
        if !pw.is_empty() {
            return Ok(pw);
        }
    }

    dialoguer::Password::new()
        .with_prompt(format!("Password for '{title}'"))
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))
}
