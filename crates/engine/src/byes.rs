//! Bye auto-completion
//!
//! Small brackets commonly open with chains of byes: a real team advances
//! into a bye match, which resolves instantly and advances it into the next
//! one. The resolver absorbs whole chains with a FIFO work-queue instead of
//! recursion, so a pathological all-bye column costs bounded stack.

use crate::placement::place_team;
use crate::topology::winner_routes_to;
use ahash::AHashSet;
use bracket_core::{AdvanceError, MatchId, MatchUpdate};
use bracket_store::BracketTx;
use std::collections::VecDeque;
use tracing::debug;

/// Resolve every reachable bye starting from the given seed matches.
///
/// A match resolves as a bye only when it is structurally flagged `is_bye`,
/// holds at least one team, and has no winner yet. A decided bye is never
/// touched again, which is what makes re-running the resolver harmless.
///
/// Returns the number of byes completed.
pub fn resolve_byes(
    tx: &mut dyn BracketTx,
    seeds: impl IntoIterator<Item = MatchId>,
) -> Result<usize, AdvanceError> {
    let mut queue: VecDeque<MatchId> = seeds.into_iter().collect();
    let mut processed: AHashSet<MatchId> = AHashSet::new();
    let mut resolved = 0usize;

    while let Some(id) = queue.pop_front() {
        if !processed.insert(id) {
            continue;
        }
        // Re-read: earlier queue entries may have placed a team here
        let m = tx.match_by_id(id)?;
        if !m.is_bye || m.winner.is_some() {
            continue;
        }
        let Some(team) = m.sole_team() else {
            continue;
        };

        tx.update_match(id, MatchUpdate::set_winner(team))?;
        resolved += 1;
        debug!("auto-completed bye match {} for team {}", id, team);

        let segment = tx.round(m.round)?.segment;
        for edge in tx.children_of(id)? {
            if !winner_routes_to(segment, edge.segment) {
                continue;
            }
            place_team(tx, edge.child.id, edge.slot, team)?;
            queue.push_back(edge.child.id);
        }
    }

    Ok(resolved)
}
