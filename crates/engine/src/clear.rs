//! Downstream clearing: removing an invalidated team from the bracket

use ahash::AHashSet;
use bracket_core::{AdvanceError, Field, MatchId, MatchUpdate, TeamId};
use bracket_store::BracketTx;
use tracing::debug;

/// Remove a team from every match it was propagated into from `source`,
/// unwinding recorded winners along the way.
///
/// Uses an explicit work-stack instead of recursion so the walk depth is
/// bounded regardless of bracket size. The pedigree graph is acyclic, so the
/// visited set only guards against re-processing a (match, team) pair when
/// overlapping unwinds meet.
///
/// Returns the number of child slots cleared.
pub(crate) fn clear_downstream(
    tx: &mut dyn BracketTx,
    source: MatchId,
    stale: TeamId,
) -> Result<usize, AdvanceError> {
    let mut work: Vec<(MatchId, TeamId)> = vec![(source, stale)];
    let mut seen: AHashSet<(MatchId, TeamId)> = AHashSet::new();
    let mut cleared = 0usize;

    while let Some((source, team)) = work.pop() {
        if !seen.insert((source, team)) {
            continue;
        }
        for edge in tx.children_of(source)? {
            if edge.child.team_in(edge.slot) != Some(team) {
                continue;
            }
            let mut update = MatchUpdate::clear_slot(edge.slot);
            if let Some(dependent) = edge.child.winner {
                // The child's result was contested with an invalid
                // participant; unwind whatever was built on it.
                update.winner = Field::Clear;
                work.push((edge.child.id, dependent));
            }
            tx.update_match(edge.child.id, update)?;
            cleared += 1;
            debug!(
                "cleared team {} from match {} slot {}",
                team, edge.child.id, edge.slot
            );
        }
    }

    Ok(cleared)
}
