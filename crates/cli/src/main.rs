//! Clan boss simulator front end.
//!
//! Run with: `cbsim <command>`. Set `RUST_LOG` for engine and search logs.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{ListCatalog, Search, Simulate};

/// Clan boss turn-resolution simulator
#[derive(Parser)]
#[command(name = "cbsim")]
#[command(about = "Simulate and search clan boss rosters", long_about = None)]
#[command(version)]
struct Cli {
    /// Extra catalogue (RON) layered over the built-in content
    #[arg(long, global = true, value_name = "FILE", env = "CBSIM_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run one scenario and report how far it got
    Simulate(Simulate),

    /// Search the scenario's variable characters for surviving rosters
    Search(Search),

    /// List characters and abilities
    Catalog(ListCatalog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and CBSIM_CATALOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = commands::load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(&catalog),
        Command::Search(cmd) => cmd.execute(&catalog),
        Command::Catalog(cmd) => cmd.execute(&catalog),
    }
}
