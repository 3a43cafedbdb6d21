//! Sweep the whole bracket for unresolved bye chains

use anyhow::{Context, Result};
use bracket_core::MatchId;
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(store_path: &Path) -> Result<()> {
    let store = SledStore::open(store_path).context("Failed to open bracket store")?;

    let seeds: Vec<MatchId> = store
        .all_matches()?
        .iter()
        .filter(|m| m.is_bye)
        .map(|m| m.id)
        .collect();

    let mut tx = store.begin();
    let resolved = bracket_engine::resolve_byes(&mut tx, seeds).context("Bye sweep failed")?;
    tx.commit().context("Failed to commit bye sweep")?;

    if resolved == 0 {
        println!("{}", "No unresolved byes found".dimmed());
    } else {
        println!(
            "Resolved {} bye match(es)",
            resolved.to_string().yellow().bold()
        );
    }
    Ok(())
}
