//! In-memory match-graph store
//!
//! The transaction clones the whole graph on begin and swaps it back on
//! commit, which gives snapshot isolation with last-commit-wins semantics.
//! Brackets are small; the clone is cheap and keeps the semantics obvious.
//! This store is the behavioral reference for `SledStore`.

use crate::tx::{BracketTx, ChildEdge};
use bracket_core::{
    BracketSegment, Match, MatchId, MatchUpdate, Round, RoundId, Slot, StageId, StoreError,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct State {
    rounds: BTreeMap<RoundId, Round>,
    matches: BTreeMap<MatchId, Match>,
}

impl State {
    fn round(&self, id: RoundId) -> Result<Round, StoreError> {
        self.rounds
            .get(&id)
            .cloned()
            .ok_or(StoreError::MissingRound(id))
    }

    fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        self.matches
            .get(&id)
            .cloned()
            .ok_or(StoreError::MissingMatch(id))
    }

    fn children_of(&self, id: MatchId) -> Result<Vec<ChildEdge>, StoreError> {
        let mut edges = Vec::new();
        for child in self.matches.values() {
            for slot in [Slot::A, Slot::B] {
                if child.source(slot) == Some(id) {
                    let segment = self.round(child.round)?.segment;
                    edges.push(ChildEdge {
                        slot,
                        segment,
                        child: child.clone(),
                    });
                }
            }
        }
        Ok(edges)
    }

    fn finals_match(&self, stage: StageId, depth: u32) -> Result<Option<Match>, StoreError> {
        let round = self.rounds.values().find(|r| {
            r.stage == stage && r.segment == Some(BracketSegment::Finals) && r.depth == depth
        });
        let Some(round) = round else {
            return Ok(None);
        };
        Ok(self
            .matches
            .values()
            .find(|m| m.round == round.id)
            .cloned())
    }
}

/// Match-graph store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a round (bracket construction happens outside the engine)
    pub fn insert_round(&self, round: Round) {
        self.state.write().rounds.insert(round.id, round);
    }

    /// Seed a match
    pub fn insert_match(&self, m: Match) {
        self.state.write().matches.insert(m.id, m);
    }

    /// Begin a transaction over a snapshot of the current state
    pub fn begin(&self) -> MemoryTx<'_> {
        MemoryTx {
            store: self,
            state: self.state.read().clone(),
        }
    }

    /// Read a match outside any transaction
    pub fn match_by_id(&self, id: MatchId) -> Option<Match> {
        self.state.read().matches.get(&id).cloned()
    }

    /// All matches, in id order
    pub fn all_matches(&self) -> Vec<Match> {
        self.state.read().matches.values().cloned().collect()
    }

    /// All rounds, in id order
    pub fn all_rounds(&self) -> Vec<Round> {
        self.state.read().rounds.values().cloned().collect()
    }
}

/// Transaction over a `MemoryStore` snapshot
///
/// Dropping the transaction without calling [`MemoryTx::commit`] discards
/// every write.
pub struct MemoryTx<'a> {
    store: &'a MemoryStore,
    state: State,
}

impl MemoryTx<'_> {
    /// Publish this transaction's writes
    pub fn commit(self) {
        *self.store.state.write() = self.state;
    }
}

impl BracketTx for MemoryTx<'_> {
    fn round(&mut self, id: RoundId) -> Result<Round, StoreError> {
        self.state.round(id)
    }

    fn match_by_id(&mut self, id: MatchId) -> Result<Match, StoreError> {
        self.state.match_by_id(id)
    }

    fn children_of(&mut self, id: MatchId) -> Result<Vec<ChildEdge>, StoreError> {
        self.state.children_of(id)
    }

    fn finals_match(&mut self, stage: StageId, depth: u32) -> Result<Option<Match>, StoreError> {
        self.state.finals_match(stage, depth)
    }

    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<(), StoreError> {
        let target = self
            .state
            .matches
            .get_mut(&id)
            .ok_or(StoreError::MissingMatch(id))?;
        update.apply(target);
        Ok(())
    }
}
