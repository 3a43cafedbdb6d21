//! Bracketline CLI - brkt command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod config;

/// Bracketline - double-elimination bracket advancement
#[derive(Parser)]
#[command(name = "brkt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the bracket store (default: bracket.toml, else .bracket/store)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a bracket definition (rounds and matches) into the store
    Import {
        /// JSON bracket definition produced by an external generator
        file: PathBuf,
    },
    /// Record a decided match and propagate the result
    Advance {
        /// Match id
        match_id: String,
        /// Winning team id
        winner: String,
        /// Losing team id (omit for a match with no real opponent)
        #[arg(long)]
        loser: Option<String>,
    },
    /// Withdraw a recorded result and unwind its downstream effects
    Retract {
        /// Match id
        match_id: String,
    },
    /// Sweep the whole bracket for unresolved bye chains
    Byes,
    /// Audit the stored bracket for structural problems
    Verify,
    /// Print the bracket, round by round
    Show {
        /// Restrict output to one stage id
        #[arg(long)]
        stage: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store_path = config::resolve_store_path(cli.store)?;

    match cli.command {
        Commands::Import { file } => cmd::import::run(&store_path, &file),
        Commands::Advance {
            match_id,
            winner,
            loser,
        } => cmd::advance::run(&store_path, &match_id, &winner, loser.as_deref()),
        Commands::Retract { match_id } => cmd::retract::run(&store_path, &match_id),
        Commands::Byes => cmd::byes::run(&store_path),
        Commands::Verify => cmd::verify::run(&store_path),
        Commands::Show { stage } => cmd::show::run(&store_path, stage.as_deref()),
    }
}
