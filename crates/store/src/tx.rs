//! The transaction interface the engine runs against

use bracket_core::{
    BracketSegment, Match, MatchId, MatchUpdate, Round, RoundId, Slot, StageId, StoreError,
};

/// A pedigree edge leading out of a match, with the child resolved
///
/// A child appears once per edge direction: a match feeding both slots of
/// the same child yields two entries.
#[derive(Debug, Clone)]
pub struct ChildEdge {
    /// Slot of the child that this edge feeds
    pub slot: Slot,
    /// Segment of the child's round, resolved at read time
    pub segment: Option<BracketSegment>,
    /// Snapshot of the child match
    pub child: Match,
}

/// One atomic view of the match graph
///
/// All reads observe the transaction's own writes. Implementations must not
/// publish any write before the (implementation-specific) commit; dropping
/// a transaction discards it entirely.
pub trait BracketTx {
    /// Point read of a round
    fn round(&mut self, id: RoundId) -> Result<Round, StoreError>;

    /// Point read of a match
    fn match_by_id(&mut self, id: MatchId) -> Result<Match, StoreError>;

    /// Every match fed by the given match, over both edge directions,
    /// ordered deterministically (child id, then slot)
    fn children_of(&mut self, id: MatchId) -> Result<Vec<ChildEdge>, StoreError>;

    /// The match of the FINALS round at the given depth within a stage
    fn finals_match(&mut self, stage: StageId, depth: u32)
        -> Result<Option<Match>, StoreError>;

    /// Partial write of a match's mutable fields
    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<(), StoreError>;
}
