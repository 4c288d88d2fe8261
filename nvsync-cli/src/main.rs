//! nvsync — reconcile a config repository with the editor's live config.
//!
//! # Usage
//!
//! ```text
//! nvsync [-q] [--repo <dir>] [--config <file>] push [-F] [--follow-symlinks]
//! nvsync [-q] [--repo <dir>] [--config <file>] pull [-F] [--follow-symlinks]
//! nvsync [-q] [--repo <dir>] [--config <file>] bootstrap
//! ```

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::sync::SyncArgs;
use commands::GlobalArgs;
use nvsync_core::SyncDirection;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "nvsync",
    version,
    about = "Installs/synchronizes Neovim configuration files",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy files from the repository into the local config directory.
    Push(SyncArgs),

    /// Copy files from the local config directory into the repository.
    Pull(SyncArgs),

    /// Install the plugin manager if it is missing.
    Bootstrap,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Push(args) => commands::sync::run(&cli.global, &args, SyncDirection::Push),
        Commands::Pull(args) => commands::sync::run(&cli.global, &args, SyncDirection::Pull),
        Commands::Bootstrap => commands::bootstrap::run(&cli.global),
    }
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(false)
        .without_time()
        .try_init();
}
