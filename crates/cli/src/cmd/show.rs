//! Print the bracket, round by round

use super::parse_stage_id;
use anyhow::{Context, Result};
use bracket_core::{BracketSegment, Match, Round, TeamId};
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use std::cmp::Reverse;
use std::path::Path;

pub fn run(store_path: &Path, stage: Option<&str>) -> Result<()> {
    let stage = stage.map(parse_stage_id).transpose()?;

    let store = SledStore::open(store_path).context("Failed to open bracket store")?;
    let mut rounds = store.all_rounds()?;
    if let Some(stage) = stage {
        rounds.retain(|r| r.stage == stage);
    }
    // Winner bracket first, finals last, deepest rounds first within each
    rounds.sort_by_key(|r| (segment_rank(r.segment), Reverse(r.depth)));

    let matches = store.all_matches()?;
    if rounds.is_empty() {
        println!("{}", "No rounds found".dimmed());
        return Ok(());
    }

    for round in &rounds {
        println!("{}", round_header(round).bold());
        for m in matches.iter().filter(|m| m.round == round.id) {
            println!("  {}", render_match(m));
        }
        println!();
    }
    Ok(())
}

fn segment_rank(segment: Option<BracketSegment>) -> u8 {
    match segment {
        Some(BracketSegment::Winner) => 0,
        Some(BracketSegment::Loser) => 1,
        Some(BracketSegment::Finals) => 2,
        None => 3,
    }
}

fn round_header(round: &Round) -> String {
    let label = match round.segment {
        Some(BracketSegment::Winner) => "WINNER",
        Some(BracketSegment::Loser) => "LOSER",
        Some(BracketSegment::Finals) => "FINALS",
        None => "ROUND",
    };
    format!("{} depth {}", label, round.depth)
}

fn render_match(m: &Match) -> String {
    let mut line = format!(
        "{}  {} vs {}",
        m.id.to_string().dimmed(),
        slot_label(m.team_a),
        slot_label(m.team_b)
    );
    if m.is_bye {
        line.push_str(&format!("  {}", "[bye]".cyan()));
    }
    if let Some(winner) = m.winner {
        line.push_str(&format!("  {} {}", "winner:".green(), winner));
    }
    line
}

fn slot_label(team: Option<TeamId>) -> String {
    match team {
        Some(team) => team.to_string(),
        None => "(open)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::{RoundId, StageId};

    #[test]
    fn segments_order_winner_loser_finals() {
        let stage = StageId::generate();
        let mut rounds = vec![
            Round::new(stage, Some(BracketSegment::Finals), 0),
            Round::new(stage, Some(BracketSegment::Loser), 1),
            Round::new(stage, Some(BracketSegment::Winner), 2),
            Round::new(stage, Some(BracketSegment::Finals), 1),
        ];
        rounds.sort_by_key(|r| (segment_rank(r.segment), Reverse(r.depth)));
        let labels: Vec<String> = rounds.iter().map(round_header).collect();
        assert_eq!(
            labels,
            vec!["WINNER depth 2", "LOSER depth 1", "FINALS depth 1", "FINALS depth 0"]
        );
    }

    #[test]
    fn open_slots_render_as_placeholders() {
        let m = Match::new(RoundId::generate());
        let line = render_match(&m);
        assert!(line.contains("(open) vs (open)"));
        assert!(!line.contains("winner:"));
    }
}
