//! The advancement orchestrator
//!
//! `advance` is the single entry point the score-entry path calls once a
//! match has a determined winner. All steps run against one transaction
//! handle; the caller commits on success or drops the transaction on error,
//! so an advancement either fully applies or has no effect.

use crate::byes::resolve_byes;
use crate::cascade::cascade_winner_change;
use crate::clear::clear_downstream;
use crate::placement::place_team;
use crate::topology::{
    classify, winner_routes_to, FINAL_GAME_ONE_DEPTH, LOSER_BRACKET_SEAT, RESET_FINAL_DEPTH,
    WINNER_BRACKET_SEAT,
};
use bracket_core::{
    AdvanceError, BracketSegment, Field, Match, MatchId, MatchUpdate, StoreError, TeamId,
};
use bracket_store::BracketTx;
use tracing::{debug, info};

/// Outcome summary of one advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancementResult {
    pub winner: TeamId,
    pub loser: Option<TeamId>,
    /// Matches the winner was routed into
    pub advanced_winner_matches: usize,
    /// Matches the loser was routed into
    pub advanced_loser_matches: usize,
    /// True when the loser-bracket champion won Final Game 1
    pub bracket_reset_triggered: bool,
}

/// Outcome summary of one retraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetractionResult {
    /// The winner whose result was withdrawn
    pub retracted: TeamId,
    /// Downstream slots the team was removed from
    pub cleared_matches: usize,
}

/// Propagate a decided match through the bracket.
///
/// `winner` must be one of the match's current teams; `loser` must be the
/// other team, or `None` for a match with no real opponent. The steps run
/// strictly in order: winner-change cascade, finals reset check, structural
/// advancement, bye resolution, loser-routing integrity check.
pub fn advance(
    tx: &mut dyn BracketTx,
    match_id: MatchId,
    winner: TeamId,
    loser: Option<TeamId>,
) -> Result<AdvancementResult, AdvanceError> {
    let current = read_match(tx, match_id)?;

    // Preconditions: fail fast, before any write
    let Some(winner_slot) = current.slot_of(winner) else {
        return Err(AdvanceError::InvalidWinner {
            match_id,
            team: winner,
        });
    };
    if let Some(team) = loser {
        if current.slot_of(team) != Some(winner_slot.other()) {
            return Err(AdvanceError::InvalidLoser { match_id, team });
        }
    }

    let round = tx.round(current.round)?;
    let topology = classify(&round);

    // Step 1: a correction must be cascaded before anything else so the
    // remaining steps operate on the corrected world
    if let Some(old) = current.winner {
        if old != winner {
            cascade_winner_change(tx, match_id, old, winner)?;
        }
    }
    let own = MatchUpdate::set_winner(winner).pruned_against(&current);
    if !own.is_empty() {
        tx.update_match(match_id, own)?;
    }

    // Step 2: finals bracket reset
    let mut bracket_reset_triggered = false;
    let mut reset_match_id = None;
    let mut touched: Vec<MatchId> = Vec::new();
    if topology.is_final_game_one() {
        let reset = tx.finals_match(round.stage, RESET_FINAL_DEPTH)?;
        if current.team_in(LOSER_BRACKET_SEAT) == Some(winner) {
            // The loser-bracket champion took Game 1; both teams meet again
            let reset = reset.ok_or_else(|| {
                AdvanceError::Topology(format!(
                    "stage {} has no reset final to seed",
                    round.stage
                ))
            })?;
            let update = MatchUpdate::default()
                .with_slot(
                    WINNER_BRACKET_SEAT,
                    Field::from_option(current.team_in(WINNER_BRACKET_SEAT)),
                )
                .with_slot(
                    LOSER_BRACKET_SEAT,
                    Field::from_option(current.team_in(LOSER_BRACKET_SEAT)),
                )
                .pruned_against(&reset);
            if !update.is_empty() {
                tx.update_match(reset.id, update)?;
            }
            bracket_reset_triggered = true;
            reset_match_id = Some(reset.id);
            touched.push(reset.id);
            info!(
                "bracket reset triggered in match {}: reset final {} seeded",
                match_id, reset.id
            );
        } else if let Some(reset) = reset {
            // Winner-bracket champion closed it out; leave the reset final
            // visibly inert rather than carrying stale placeholders
            let mut update = MatchUpdate::default()
                .with_slot(WINNER_BRACKET_SEAT, Field::Clear)
                .with_slot(LOSER_BRACKET_SEAT, Field::Clear);
            if reset.winner.is_some() {
                // A decided reset final can only be stale history here
                update.winner = Field::Clear;
            }
            let update = update.pruned_against(&reset);
            if !update.is_empty() {
                tx.update_match(reset.id, update)?;
            }
            if let Some(stale) = reset.winner {
                clear_downstream(tx, reset.id, stale)?;
            }
        }
    }

    // Step 3: structural advancement along the pedigree edges
    let mut advanced_winner_matches = 0usize;
    let mut advanced_loser_matches = 0usize;
    let children = tx.children_of(match_id)?;
    let mut loser_side_routed = false;

    for edge in &children {
        if !winner_routes_to(topology.segment, edge.segment) {
            continue;
        }
        if topology.is_loser_bracket() {
            loser_side_routed = true;
        }
        if Some(edge.child.id) == reset_match_id {
            // Already seeded with both finalists; a generic placement
            // would overwrite half of it
            continue;
        }
        place_team(tx, edge.child.id, edge.slot, winner)?;
        advanced_winner_matches += 1;
        touched.push(edge.child.id);
    }

    if topology.is_winner_bracket() {
        if let Some(loser_team) = loser {
            for edge in &children {
                if edge.segment != Some(BracketSegment::Loser) {
                    continue;
                }
                place_team(tx, edge.child.id, edge.slot, loser_team)?;
                advanced_loser_matches += 1;
                touched.push(edge.child.id);
            }
        }
    }

    // The loser-bracket final has no onward edge; its champion enters
    // Final Game 1 in the loser-bracket seat
    if topology.is_loser_bracket() && !loser_side_routed {
        let finals = tx
            .finals_match(round.stage, FINAL_GAME_ONE_DEPTH)?
            .ok_or_else(|| {
                AdvanceError::Topology(format!(
                    "loser bracket match {} has no onward route and stage {} has no finals",
                    match_id, round.stage
                ))
            })?;
        place_team(tx, finals.id, LOSER_BRACKET_SEAT, winner)?;
        advanced_winner_matches += 1;
        touched.push(finals.id);
        debug!(
            "loser bracket champion {} seated into final {}",
            winner, finals.id
        );
    }

    // Step 4: absorb bye chains opened up by the placements above
    resolve_byes(tx, touched.iter().copied())?;

    // Step 5: the corrected routing rules never send a winner-bracket
    // winner into a loser-bracket slot; if one is there the graph itself is
    // inconsistent and the caller must hear about it
    if topology.is_winner_bracket() {
        for edge in &children {
            if edge.segment != Some(BracketSegment::Loser) {
                continue;
            }
            let child = tx.match_by_id(edge.child.id)?;
            if child.team_in(edge.slot) == Some(winner) {
                return Err(AdvanceError::Topology(format!(
                    "winner {} of match {} occupies loser bracket match {} slot {}",
                    winner, match_id, child.id, edge.slot
                )));
            }
        }
    }

    info!(
        "advanced match {}: winner into {} matches, loser into {} matches",
        match_id, advanced_winner_matches, advanced_loser_matches
    );

    Ok(AdvancementResult {
        winner,
        loser,
        advanced_winner_matches,
        advanced_loser_matches,
        bracket_reset_triggered,
    })
}

/// Withdraw a recorded result: unset the match's winner and remove it from
/// every downstream slot it was propagated into, unwinding dependent
/// results along the way.
pub fn retract(
    tx: &mut dyn BracketTx,
    match_id: MatchId,
) -> Result<RetractionResult, AdvanceError> {
    let current = read_match(tx, match_id)?;
    let Some(retracted) = current.winner else {
        return Err(AdvanceError::NothingToRetract(match_id));
    };

    tx.update_match(match_id, MatchUpdate::default().with_winner(Field::Clear))?;
    let cleared_matches = clear_downstream(tx, match_id, retracted)?;
    info!(
        "retracted winner {} of match {}; cleared {} downstream slots",
        retracted, match_id, cleared_matches
    );

    Ok(RetractionResult {
        retracted,
        cleared_matches,
    })
}

fn read_match(tx: &mut dyn BracketTx, id: MatchId) -> Result<Match, AdvanceError> {
    match tx.match_by_id(id) {
        Ok(m) => Ok(m),
        Err(StoreError::MissingMatch(_)) => Err(AdvanceError::UnknownMatch(id)),
        Err(err) => Err(err.into()),
    }
}
