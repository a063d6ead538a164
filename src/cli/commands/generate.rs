//! `passvault generate` — print a random password.

use crate::cli::load_settings;
use crate::crypto::password::generate_random_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>, alphabet: Option<&str>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => load_settings()?.password_length,
    };

    println!("{}", generate_random_password(Some(length), alphabet)?);
    Ok(())
}
