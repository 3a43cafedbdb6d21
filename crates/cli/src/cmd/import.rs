//! Load an externally generated bracket definition into the store

use anyhow::{Context, Result};
use bracket_core::{Match, Round};
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::path::Path;

/// Bracket definition file: rounds plus matches with their pedigree edges
/// already wired up by the generator
#[derive(Debug, Deserialize)]
pub(crate) struct BracketFile {
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
}

pub fn run(store_path: &Path, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let bracket: BracketFile =
        serde_json::from_str(&raw).context("Failed to parse bracket definition")?;

    let store = SledStore::open(store_path).context("Failed to open bracket store")?;
    for round in &bracket.rounds {
        store.insert_round(round)?;
    }
    for m in &bracket.matches {
        store.insert_match(m)?;
    }

    println!("{}", "Import complete".green().bold());
    println!("Rounds:  {}", bracket.rounds.len());
    println!("Matches: {}", bracket.matches.len());
    Ok(())
}
