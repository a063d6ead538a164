//! `passvault hash` — print the verification hash of the master password.

use crate::cli::{open_library, Cli};
use crate::errors::Result;

/// Execute the `hash` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let lib = open_library(cli).await?;
    println!("{}", lib.manager.hash());
    Ok(())
}
