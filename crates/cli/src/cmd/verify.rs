//! Structural audit of the stored bracket
//!
//! Read-only: reports orphaned winners, self-play, two-team byes, dangling
//! pedigree edges, and winners misrouted into loser-bracket slots.

use anyhow::{bail, Context, Result};
use bracket_core::{BracketSegment, Match, MatchId, Round, RoundId, Slot};
use bracket_store::SledStore;
use owo_colors::OwoColorize;
use std::collections::HashMap;
use std::path::Path;

pub fn run(store_path: &Path) -> Result<()> {
    let store = SledStore::open(store_path).context("Failed to open bracket store")?;
    let matches = store.all_matches()?;
    let rounds = store.all_rounds()?;

    let problems = audit(&matches, &rounds);
    if problems.is_empty() {
        println!(
            "{} ({} matches, {} rounds)",
            "Bracket structure OK".green().bold(),
            matches.len(),
            rounds.len()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("{} {}", "problem:".red().bold(), problem);
    }
    bail!("{} structural problem(s) found", problems.len());
}

fn audit(matches: &[Match], rounds: &[Round]) -> Vec<String> {
    let by_id: HashMap<MatchId, &Match> = matches.iter().map(|m| (m.id, m)).collect();
    let rounds: HashMap<RoundId, &Round> = rounds.iter().map(|r| (r.id, r)).collect();
    let segment_of = |m: &Match| rounds.get(&m.round).and_then(|r| r.segment);

    let mut problems = Vec::new();
    for m in matches {
        if let Some(winner) = m.winner {
            if m.slot_of(winner).is_none() {
                problems.push(format!(
                    "match {}: winner {} is not one of its teams",
                    m.id, winner
                ));
            }
        }
        if let (Some(a), Some(b)) = (m.team_a, m.team_b) {
            if a == b {
                problems.push(format!("match {}: team {} occupies both slots", m.id, a));
            }
            if m.is_bye {
                problems.push(format!("match {}: bye match holds two real teams", m.id));
            }
        }
        if !rounds.contains_key(&m.round) {
            problems.push(format!("match {}: round {} does not exist", m.id, m.round));
        }
        for slot in [Slot::A, Slot::B] {
            if let Some(source) = m.source(slot) {
                if !by_id.contains_key(&source) {
                    problems.push(format!(
                        "match {}: pedigree edge for slot {} points at missing match {}",
                        m.id, slot, source
                    ));
                }
            }
        }
    }

    // A winner-bracket winner must never sit in a loser-bracket slot its
    // own match feeds; only the loser is routed there
    for m in matches {
        let Some(winner) = m.winner else { continue };
        if segment_of(m) != Some(BracketSegment::Winner) {
            continue;
        }
        for child in matches {
            if segment_of(child) != Some(BracketSegment::Loser) {
                continue;
            }
            for slot in [Slot::A, Slot::B] {
                if child.source(slot) == Some(m.id) && child.team_in(slot) == Some(winner) {
                    problems.push(format!(
                        "match {}: winner {} misrouted into loser bracket match {}",
                        m.id, winner, child.id
                    ));
                }
            }
        }
    }

    problems
}
