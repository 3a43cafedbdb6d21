//! Withdraw a recorded result

use super::parse_match_id;
use anyhow::{Context, Result};
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(store_path: &Path, match_id: &str) -> Result<()> {
    let match_id = parse_match_id(match_id)?;

    let store = SledStore::open(store_path).context("Failed to open bracket store")?;
    let mut tx = store.begin();
    let result = bracket_engine::retract(&mut tx, match_id).context("Retraction failed")?;
    tx.commit().context("Failed to commit retraction")?;

    println!("{}", "Retraction complete".green().bold());
    println!(
        "Removed winner {} from {} downstream slot(s)",
        result.retracted,
        result.cleared_matches.to_string().yellow()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::{BracketSegment, Match, Round, StageId, TeamId};
    use tempfile::TempDir;

    #[test]
    fn retract_clears_the_winner_and_its_placements() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("store");

        let round = Round::new(StageId::generate(), Some(BracketSegment::Winner), 1);
        let team = TeamId::generate();
        let mut decided = Match::new(round.id);
        decided.team_a = Some(team);
        decided.team_b = Some(TeamId::generate());
        decided.winner = Some(team);
        let mut child = Match::new(round.id);
        child.source_a = Some(decided.id);
        child.team_a = Some(team);
        {
            let store = SledStore::open(&store_path).unwrap();
            store.insert_round(&round).unwrap();
            store.insert_match(&decided).unwrap();
            store.insert_match(&child).unwrap();
        }

        run(&store_path, &decided.id.to_string()).unwrap();

        let store = SledStore::open(&store_path).unwrap();
        assert_eq!(store.match_by_id(decided.id).unwrap().unwrap().winner, None);
        assert_eq!(store.match_by_id(child.id).unwrap().unwrap().team_a, None);
    }

    #[test]
    fn undecided_match_cannot_be_retracted() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("store");

        let round = Round::new(StageId::generate(), Some(BracketSegment::Winner), 1);
        let m = Match::new(round.id);
        {
            let store = SledStore::open(&store_path).unwrap();
            store.insert_round(&round).unwrap();
            store.insert_match(&m).unwrap();
        }

        assert!(run(&store_path, &m.id.to_string()).is_err());
    }
}
