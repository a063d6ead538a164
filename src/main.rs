use clap::Parser;
use passvault::cli::commands::add::NewEntry;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Settings may be broken; logging still comes up at the default level.
    let log_level = passvault::cli::load_settings()
        .map(|s| s.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    init_tracing(&log_level);

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli).await,
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
            generate,
        } => {
            let entry = NewEntry {
                title,
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                generate,
            };
            passvault::cli::commands::add::execute(&cli, entry).await
        }
        Commands::Get { ref title } => passvault::cli::commands::get::execute(&cli, title).await,
        Commands::List => passvault::cli::commands::list::execute(&cli).await,
        Commands::Remove { ref title, force } => {
            passvault::cli::commands::remove::execute(&cli, title, force).await
        }
        Commands::RotateKey => passvault::cli::commands::rotate::execute(&cli).await,
        Commands::Generate {
            length,
            ref alphabet,
        } => passvault::cli::commands::generate::execute(length, alphabet.as_deref()),
        Commands::Hash => passvault::cli::commands::hash::execute(&cli).await,
        Commands::Status => passvault::cli::commands::status::execute(&cli).await,
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` or `passvault=<log_level>,warn`.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
