//! Match records, slots, and partial updates

use crate::id::{MatchId, RoundId, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two team positions in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The opposite position
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => f.write_str("A"),
            Slot::B => f.write_str("B"),
        }
    }
}

/// A node in the bracket graph
///
/// `source_a`/`source_b` are the pedigree edges: back-references to the two
/// matches whose outcomes feed this match's `team_a`/`team_b` slots. They are
/// created during bracket generation and never rewritten by the engine; the
/// engine only mutates `team_a`, `team_b` and `winner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: RoundId,
    #[serde(default)]
    pub team_a: Option<TeamId>,
    #[serde(default)]
    pub team_b: Option<TeamId>,
    #[serde(default)]
    pub winner: Option<TeamId>,
    /// True only for matches structurally created with a single real team
    /// and a permanently-absent opponent
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default)]
    pub source_a: Option<MatchId>,
    #[serde(default)]
    pub source_b: Option<MatchId>,
}

impl Match {
    pub fn new(round: RoundId) -> Self {
        Self {
            id: MatchId::generate(),
            round,
            team_a: None,
            team_b: None,
            winner: None,
            is_bye: false,
            source_a: None,
            source_b: None,
        }
    }

    /// The team occupying the given slot, if any
    pub fn team_in(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Slot::A => self.team_a,
            Slot::B => self.team_b,
        }
    }

    /// The slot occupied by the given team, if it participates here
    pub fn slot_of(&self, team: TeamId) -> Option<Slot> {
        if self.team_a == Some(team) {
            Some(Slot::A)
        } else if self.team_b == Some(team) {
            Some(Slot::B)
        } else {
            None
        }
    }

    /// The pedigree edge feeding the given slot
    pub fn source(&self, slot: Slot) -> Option<MatchId> {
        match slot {
            Slot::A => self.source_a,
            Slot::B => self.source_b,
        }
    }

    /// The only present team, for bye matches (which by construction never
    /// hold two real teams)
    pub fn sole_team(&self) -> Option<TeamId> {
        self.team_a.or(self.team_b)
    }
}

/// A pending write to one optional field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    /// Leave the stored value alone
    Keep,
    /// Overwrite with a value
    Set(T),
    /// Unset the stored value
    Clear,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Keep
    }
}

impl<T: Copy + Eq> Field<T> {
    /// Apply this write to a stored value
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Field::Keep => {}
            Field::Set(value) => *target = Some(value),
            Field::Clear => *target = None,
        }
    }

    /// Whether applying this write would change the stored value
    pub fn changes(self, current: Option<T>) -> bool {
        match self {
            Field::Keep => false,
            Field::Set(value) => current != Some(value),
            Field::Clear => current.is_some(),
        }
    }

    /// Write that makes the stored value equal `desired`
    pub fn from_option(desired: Option<T>) -> Self {
        match desired {
            Some(value) => Field::Set(value),
            None => Field::Clear,
        }
    }
}

/// Partial update of a match's mutable fields
///
/// All fields default to `Keep`; the store applies exactly what is set. The
/// pedigree edges and the bye flag are deliberately not expressible here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchUpdate {
    pub team_a: Field<TeamId>,
    pub team_b: Field<TeamId>,
    pub winner: Field<TeamId>,
}

impl MatchUpdate {
    /// Update writing `team` into the given slot
    pub fn set_slot(slot: Slot, team: TeamId) -> Self {
        Self::default().with_slot(slot, Field::Set(team))
    }

    /// Update unsetting the given slot
    pub fn clear_slot(slot: Slot) -> Self {
        Self::default().with_slot(slot, Field::Clear)
    }

    /// Update recording a winner
    pub fn set_winner(team: TeamId) -> Self {
        Self {
            winner: Field::Set(team),
            ..Self::default()
        }
    }

    pub fn with_slot(mut self, slot: Slot, field: Field<TeamId>) -> Self {
        match slot {
            Slot::A => self.team_a = field,
            Slot::B => self.team_b = field,
        }
        self
    }

    pub fn with_winner(mut self, field: Field<TeamId>) -> Self {
        self.winner = field;
        self
    }

    /// True if no field would be written
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to a record in place
    pub fn apply(&self, target: &mut Match) {
        self.team_a.apply(&mut target.team_a);
        self.team_b.apply(&mut target.team_b);
        self.winner.apply(&mut target.winner);
    }

    /// Drop every field that would not change `current`
    ///
    /// Propagation is idempotent because callers only issue writes that
    /// survive this pruning; an unchanged match is never touched.
    pub fn pruned_against(mut self, current: &Match) -> Self {
        if !self.team_a.changes(current.team_a) {
            self.team_a = Field::Keep;
        }
        if !self.team_b.changes(current.team_b) {
            self.team_b = Field::Keep;
        }
        if !self.winner.changes(current.winner) {
            self.winner = Field::Keep;
        }
        self
    }
}
