//! Gung Corner CLI - catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the sample catalog (no-op when products already exist)
//! gc-cli seed
//!
//! # List the current catalog
//! gc-cli list
//!
//! # Verify configuration and store connectivity
//! gc-cli check
//! ```
//!
//! The CLI reads the same environment variables as the web server, so it
//! talks to whichever backend `GUNG_BACKEND` selects.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(author, version, about = "Gung Corner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the sample catalog into an empty store
    Seed,
    /// List the products currently in the catalog
    List,
    /// Verify configuration and store connectivity
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run().await?,
        Commands::List => commands::list::run().await?,
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
