//! Slot placement shared by structural advancement and bye resolution

use crate::clear::clear_downstream;
use bracket_core::{AdvanceError, Field, MatchId, MatchUpdate, Slot, TeamId};
use bracket_store::BracketTx;
use tracing::debug;

/// Put `team` into the given slot of a match.
///
/// No-op if the slot already holds the team, so repeated advancement never
/// dirties downstream state. If the placement displaces the occupant that
/// the match had recorded as its winner (reachable when a winner change
/// swaps a match's winner and loser), that result is unset and unwound:
/// a recorded winner must always be one of the match's current teams.
pub(crate) fn place_team(
    tx: &mut dyn BracketTx,
    target: MatchId,
    slot: Slot,
    team: TeamId,
) -> Result<(), AdvanceError> {
    let current = tx.match_by_id(target)?;
    if current.team_in(slot) == Some(team) {
        return Ok(());
    }
    if current.team_in(slot.other()) == Some(team) {
        return Err(AdvanceError::Topology(format!(
            "team {} would occupy both slots of match {}",
            team, target
        )));
    }

    let displaced = current.team_in(slot);
    let displaced_winner = match (displaced, current.winner) {
        (Some(d), Some(w)) if d == w => Some(w),
        _ => None,
    };

    let mut update = MatchUpdate::set_slot(slot, team);
    if displaced_winner.is_some() {
        update.winner = Field::Clear;
    }
    tx.update_match(target, update)?;
    debug!("placed team {} into match {} slot {}", team, target, slot);

    if let Some(stale) = displaced_winner {
        clear_downstream(tx, target, stale)?;
    }
    Ok(())
}
