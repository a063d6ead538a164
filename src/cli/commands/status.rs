//! `passvault status` — show library metadata.

use chrono::DateTime;

use crate::cli::output;
use crate::cli::{open_library, Cli};
use crate::errors::Result;
use crate::vault::PasswordList;

/// Execute the `status` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let lib = open_library(cli).await?;
    let envelope = lib.manager.envelope();
    let list: PasswordList = lib.manager.password_list().await?;

    let modified = DateTime::from_timestamp(envelope.modified_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| envelope.modified_at.to_string());

    output::info(&format!("Library:         {}", lib.file.path().display()));
    output::info(&format!("Library version: {}", envelope.library_version));
    output::info(&format!("API version:     {}", envelope.api_version));
    output::info(&format!("Modified:        {modified}"));
    output::info(&format!("Entries:         {}", list.len()));

    Ok(())
}
