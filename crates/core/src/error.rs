//! Error taxonomy shared by the store and the engine

use crate::id::{MatchId, RoundId, TeamId};
use thiserror::Error;

/// Failures raised by a match-graph store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("match {0} not found")]
    MissingMatch(MatchId),

    #[error("round {0} not found")]
    MissingRound(RoundId),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("record encoding error: {0}")]
    Codec(String),
}

impl StoreError {
    /// Wrap a backend failure (sled, I/O) without leaking its concrete type
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }

    /// Wrap a serialization failure
    pub fn codec(err: impl std::fmt::Display) -> Self {
        StoreError::Codec(err.to_string())
    }
}

/// Failures raised by the advancement engine
///
/// Precondition violations (`UnknownMatch`, `InvalidWinner`, `InvalidLoser`,
/// `NothingToRetract`) are detected before anything is written. `Topology`
/// marks a data-integrity condition in the bracket graph itself; it is
/// surfaced rather than silently repaired so that corrupt structure leaves
/// an error trail. Store failures pass through unchanged and abort the
/// caller's transaction.
#[derive(Debug, Error)]
pub enum AdvanceError {
    #[error("match {0} not found")]
    UnknownMatch(MatchId),

    #[error("team {team} is not a participant of match {match_id}")]
    InvalidWinner { match_id: MatchId, team: TeamId },

    #[error("team {team} is not the remaining participant of match {match_id}")]
    InvalidLoser { match_id: MatchId, team: TeamId },

    #[error("match {0} has no recorded winner to retract")]
    NothingToRetract(MatchId),

    #[error("bracket topology inconsistency: {0}")]
    Topology(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdvanceError {
    /// True for errors the caller should surface as invalid input rather
    /// than as a structural fault
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AdvanceError::UnknownMatch(_)
                | AdvanceError::InvalidWinner { .. }
                | AdvanceError::InvalidLoser { .. }
                | AdvanceError::NothingToRetract(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_classification() {
        let id = MatchId::generate();
        assert!(AdvanceError::UnknownMatch(id).is_precondition());
        assert!(!AdvanceError::Topology("loose edge".into()).is_precondition());
        assert!(!AdvanceError::Store(StoreError::MissingMatch(id)).is_precondition());
    }
}
