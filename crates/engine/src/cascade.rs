//! Winner-change cascading
//!
//! A corrected result propagates forward by substitution: the new winner
//! takes the old winner's place in each immediate child. Everything
//! *conditioned on* the old value further down is invalidated instead.
//! The cascade never tries to re-derive who should win downstream; it only
//! removes the poisoned state and leaves those matches for re-adjudication.

use crate::clear::clear_downstream;
use bracket_core::{AdvanceError, Field, MatchId, MatchUpdate, TeamId};
use bracket_store::BracketTx;
use tracing::info;

/// Replace `old_winner` with `new_winner` in every child slot it occupies,
/// unsetting and unwinding any child result that depended on it.
pub(crate) fn cascade_winner_change(
    tx: &mut dyn BracketTx,
    match_id: MatchId,
    old_winner: TeamId,
    new_winner: TeamId,
) -> Result<(), AdvanceError> {
    info!(
        "winner of match {} corrected: {} -> {}",
        match_id, old_winner, new_winner
    );

    for edge in tx.children_of(match_id)? {
        if edge.child.team_in(edge.slot) != Some(old_winner) {
            continue;
        }
        let mut update = MatchUpdate::set_slot(edge.slot, new_winner);
        if edge.child.winner.is_some() {
            update.winner = Field::Clear;
        }
        tx.update_match(edge.child.id, update)?;
        if let Some(dependent) = edge.child.winner {
            clear_downstream(tx, edge.child.id, dependent)?;
        }
    }

    Ok(())
}
