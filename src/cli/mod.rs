//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::kdf::Argon2Kdf;
use crate::errors::{VaultError, Result};
use crate::vault::{CryptoManager, LibraryFile};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// PassVault CLI: encrypted password library.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted, versioned password library",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Library file (overrides `library_file` in .passvault.toml)
    #[arg(short, long, global = true)]
    pub library: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty library
    Init,

    /// Add or update an entry
    Add {
        /// Entry title (e.g. github)
        title: String,
        /// Login name
        #[arg(short, long)]
        username: Option<String>,
        /// Site address
        #[arg(long)]
        url: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },

    /// Print an entry's password
    Get {
        /// Entry title
        title: String,
    },

    /// List all entries
    List,

    /// Remove an entry
    Remove {
        /// Entry title
        title: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the library's master password
    RotateKey,

    /// Print a random password
    Generate {
        /// Number of characters (default from settings)
        #[arg(short = 'n', long)]
        length: Option<usize>,
        /// Characters to draw from
        #[arg(short, long)]
        alphabet: Option<String>,
    },

    /// Print the verification hash of the master password
    Hash,

    /// Show library version and metadata
    Status,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the library password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation.
///
/// `env_var` lets scripted runs supply it (`PASSVAULT_PASSWORD` for
/// `init`, `PASSVAULT_NEW_PASSWORD` for `rotate-key`).
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Load settings from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the library file from `--library` or settings.
pub fn library_file(cli: &Cli, settings: &Settings) -> Result<LibraryFile> {
    let cwd = std::env::current_dir()?;
    let path = match &cli.library {
        Some(p) => cwd.join(p),
        None => settings.library_path(&cwd),
    };
    Ok(LibraryFile::new(path))
}

/// Everything a command needs to work on an existing library.
pub struct OpenLibrary {
    pub settings: Settings,
    pub file: LibraryFile,
    pub manager: CryptoManager<Argon2Kdf>,
}

/// Read, verify and open the library named by the CLI arguments.
pub async fn open_library(cli: &Cli) -> Result<OpenLibrary> {
    let settings = load_settings()?;
    let file = library_file(cli, &settings)?;
    let stored = file.read()?;

    let password = prompt_password()?;
    let kdf = Argon2Kdf::new(settings.argon2_params());
    let manager = CryptoManager::open_with_kdf(kdf, password.as_bytes(), &stored).await?;

    Ok(OpenLibrary {
        settings,
        file,
        manager,
    })
}
