//! Bracket topology vocabulary
//!
//! The finals seating conventions are load-bearing structural invariants of
//! bracket generation: the winner-bracket champion always enters Final
//! Game 1 as slot A, the loser-bracket champion as slot B. They are named
//! here so routing code never encodes them as raw slot comparisons.

use bracket_core::{BracketSegment, Round, Slot};

/// Seat of the winner-bracket champion in a finals match
pub const WINNER_BRACKET_SEAT: Slot = Slot::A;
/// Seat of the loser-bracket champion in a finals match
pub const LOSER_BRACKET_SEAT: Slot = Slot::B;

/// Depth of Final Game 1 within the FINALS segment
pub const FINAL_GAME_ONE_DEPTH: u32 = 1;
/// Depth of the reset final ("Final Game 2")
pub const RESET_FINAL_DEPTH: u32 = 0;

/// A round's position within the double-elimination structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub segment: Option<BracketSegment>,
    pub depth: u32,
}

/// Classify a round. Total: a round without a segment is simply outside
/// the double-elimination finals logic.
pub fn classify(round: &Round) -> Topology {
    Topology {
        segment: round.segment,
        depth: round.depth,
    }
}

impl Topology {
    pub fn is_winner_bracket(self) -> bool {
        self.segment == Some(BracketSegment::Winner)
    }

    pub fn is_loser_bracket(self) -> bool {
        self.segment == Some(BracketSegment::Loser)
    }

    /// True for the match whose outcome can trigger a bracket reset
    pub fn is_final_game_one(self) -> bool {
        self.segment == Some(BracketSegment::Finals) && self.depth == FINAL_GAME_ONE_DEPTH
    }
}

/// Whether a match's winner is routed into a child of the given segment
///
/// Loser-bracket winners stay on the loser side until the finals; everything
/// else feeds the winner side.
pub(crate) fn winner_routes_to(
    own: Option<BracketSegment>,
    child: Option<BracketSegment>,
) -> bool {
    match own {
        Some(BracketSegment::Loser) => matches!(
            child,
            Some(BracketSegment::Loser) | Some(BracketSegment::Finals)
        ),
        _ => matches!(
            child,
            Some(BracketSegment::Winner) | Some(BracketSegment::Finals)
        ),
    }
}
