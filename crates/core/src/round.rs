//! Round records and bracket segments

use crate::id::{RoundId, StageId};
use serde::{Deserialize, Serialize};

/// Which elimination path a round belongs to
///
/// Rounds outside double-elimination routing (plain single-elimination
/// stages) carry no segment at all and are left alone by the finals logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BracketSegment {
    /// Upper bracket; a loss here drops the team into the loser bracket
    Winner,
    /// Lower bracket; a loss here eliminates the team
    Loser,
    /// Culminating match(es) between the two bracket champions
    Finals,
}

/// A grouping of matches at one stage of the tournament
///
/// `depth` counts down toward the end of the segment. Within `Finals`,
/// depth 1 is Final Game 1 and depth 0 is the reset final, which exists
/// structurally but is only seeded if a reset is triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub stage: StageId,
    #[serde(default)]
    pub segment: Option<BracketSegment>,
    pub depth: u32,
}

impl Round {
    pub fn new(stage: StageId, segment: Option<BracketSegment>, depth: u32) -> Self {
        Self {
            id: RoundId::generate(),
            stage,
            segment,
            depth,
        }
    }
}
