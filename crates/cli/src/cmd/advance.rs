//! Record a decided match and propagate the result

use super::{parse_match_id, parse_team_id};
use anyhow::{Context, Result};
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(store_path: &Path, match_id: &str, winner: &str, loser: Option<&str>) -> Result<()> {
    let match_id = parse_match_id(match_id)?;
    let winner = parse_team_id(winner)?;
    let loser = loser.map(parse_team_id).transpose()?;

    let store = SledStore::open(store_path).context("Failed to open bracket store")?;
    let mut tx = store.begin();
    let result =
        bracket_engine::advance(&mut tx, match_id, winner, loser).context("Advancement failed")?;
    tx.commit().context("Failed to commit advancement")?;

    println!("{}", "Advancement complete".green().bold());
    println!(
        "Winner {} advanced into {} match(es)",
        result.winner,
        result.advanced_winner_matches.to_string().yellow()
    );
    if let Some(loser) = result.loser {
        println!(
            "Loser  {} routed into {} match(es)",
            loser,
            result.advanced_loser_matches.to_string().yellow()
        );
    }
    if result.bracket_reset_triggered {
        println!(
            "{}",
            "Bracket reset: the reset final has been seeded with both finalists"
                .yellow()
                .bold()
        );
    }
    Ok(())
}
