//! Drop-yield and profit estimator.
//!
//! Loads a data directory (catalog, market, buffs) and evaluates actions,
//! distributions and loot luck from the command line.

mod commands;
mod dirs;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Actions, Luck, Profit, Quantile};

/// Drop-yield and profit estimator
#[derive(Parser)]
#[command(name = "profit")]
#[command(about = "Estimate action profit and drop luck", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Profit report of one action over a time window
    Profit(Profit),

    /// Quantiles of a single drop distribution
    Quantile(Quantile),

    /// Luck curve of an openable container
    Luck(Luck),

    /// List actions and openable containers in the catalog
    Actions(Actions),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for PROFIT_DATA_DIR and PROFIT_LOG)
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_env("PROFIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::from_default_env())
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Profit(cmd) => cmd.execute(),
        Command::Quantile(cmd) => cmd.execute(),
        Command::Luck(cmd) => cmd.execute(),
        Command::Actions(cmd) => cmd.execute(),
    }
}
