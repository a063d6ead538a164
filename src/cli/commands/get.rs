//! `passvault get` — retrieve and print a single entry's password.

use crate::cli::{open_library, Cli};
use crate::errors::{VaultError, Result};
use crate::vault::PasswordList;

/// Execute the `get` command.
pub async fn execute(cli: &Cli, title: &str) -> Result<()> {
    let lib = open_library(cli).await?;
    let list: PasswordList = lib.manager.password_list().await?;

    let entry = list
        .get(title)
        .ok_or_else(|| VaultError::EntryNotFound(title.to_string()))?;
    println!("{}", entry.password);

    Ok(())
}
