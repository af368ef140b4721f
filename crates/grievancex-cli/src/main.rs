//! GrievanceX CLI - sign in, sign out and check page access from a terminal.
//!
//! Each invocation is one client process: it restores the persisted session
//! on startup, runs one command and exits.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::ClientConfig;

/// GrievanceX - civic grievance reporting
#[derive(Parser, Debug)]
#[command(name = "grievancex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session storage file (overrides the configuration)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Identity directory file (overrides the configuration)
    #[arg(long)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Check whether a page would be shown or redirected
    Visit {
        /// Page path, e.g. /admin or /complaint/GX-17
        path: String,
    },

    /// List demo accounts
    Accounts,

    /// Show version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("grievancex={log_level},grievancex_auth={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::Version) {
        println!("grievancex {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut out = std::io::stdout();

    if matches!(cli.command, Commands::Accounts) {
        commands::accounts(&mut out)?;
        return Ok(());
    }

    let mut config = ClientConfig::load(cli.config.as_deref());
    if cli.storage.is_some() {
        config.storage_path = cli.storage;
    }
    if cli.directory.is_some() {
        config.directory_path = cli.directory;
    }

    let authority = commands::open(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::login(&authority, &email, &password, &mut out).await?;
        }
        Commands::Logout => commands::logout(&authority, &mut out)?,
        Commands::Whoami => commands::whoami(&authority, &mut out)?,
        Commands::Visit { path } => commands::visit(&authority, &path, &mut out)?,
        Commands::Accounts | Commands::Version => {}
    }

    Ok(())
}
