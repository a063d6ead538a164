//! `passvault list` — display all entries in a table.

use crate::cli::output;
use crate::cli::{open_library, Cli};
use crate::errors::Result;
use crate::vault::PasswordList;

/// Execute the `list` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let lib = open_library(cli).await?;
    let list: PasswordList = lib.manager.password_list().await?;

    output::info(&format!(
        "library version {} — {} entr{}",
        lib.manager.library_version(),
        list.len(),
        if list.len() == 1 { "y" } else { "ies" }
    ));

    output::print_entries_table(&list);

    Ok(())
}
