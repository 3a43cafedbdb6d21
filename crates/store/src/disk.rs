//! Embedded on-disk match-graph store backed by sled
//!
//! Matches and rounds live in separate sled trees, bincode-encoded. Pedigree
//! edges are immutable once a bracket is imported, so the child index and
//! the round index are built in memory on open and only ever grow through
//! [`SledStore::insert_match`]. Transactions buffer dirty match records and
//! apply them as a single batch on commit.

use crate::tx::{BracketTx, ChildEdge};
use ahash::AHashMap;
use bracket_core::{
    BracketSegment, Match, MatchId, MatchUpdate, Round, RoundId, Slot, StageId, StoreError,
};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

type EdgeList = SmallVec<[(Slot, MatchId); 2]>;

/// Durable match-graph store
pub struct SledStore {
    db: sled::Db,
    matches: sled::Tree,
    rounds: sled::Tree,
    /// parent match id -> (fed slot, child match id)
    children: RwLock<AHashMap<MatchId, EdgeList>>,
    /// round id -> match ids in that round
    by_round: RwLock<AHashMap<RoundId, Vec<MatchId>>>,
}

impl SledStore {
    /// Open or create a store at the given path and build the edge indexes
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(StoreError::backend)?;
        let matches = db.open_tree("matches").map_err(StoreError::backend)?;
        let rounds = db.open_tree("rounds").map_err(StoreError::backend)?;

        let mut children: AHashMap<MatchId, EdgeList> = AHashMap::new();
        let mut by_round: AHashMap<RoundId, Vec<MatchId>> = AHashMap::new();
        let mut count = 0usize;
        for item in matches.iter() {
            let (_, value) = item.map_err(StoreError::backend)?;
            let m = decode_match(&value)?;
            index_match(&mut children, &mut by_round, &m);
            count += 1;
        }

        info!("opened match graph store ({} matches)", count);

        Ok(Self {
            db,
            matches,
            rounds,
            children: RwLock::new(children),
            by_round: RwLock::new(by_round),
        })
    }

    /// Store a round (bracket import path)
    pub fn insert_round(&self, round: &Round) -> Result<(), StoreError> {
        let value = bincode::serialize(round).map_err(StoreError::codec)?;
        self.rounds
            .insert(round.id.to_bytes(), value)
            .map_err(StoreError::backend)?;
        self.db.flush().map_err(StoreError::backend)?;
        Ok(())
    }

    /// Store a match and index its pedigree edges (bracket import path)
    pub fn insert_match(&self, m: &Match) -> Result<(), StoreError> {
        let value = bincode::serialize(m).map_err(StoreError::codec)?;
        self.matches
            .insert(m.id.to_bytes(), value)
            .map_err(StoreError::backend)?;
        index_match(&mut self.children.write(), &mut self.by_round.write(), m);
        self.db.flush().map_err(StoreError::backend)?;
        Ok(())
    }

    /// Begin a transaction
    pub fn begin(&self) -> SledTx<'_> {
        SledTx {
            store: self,
            dirty: BTreeMap::new(),
        }
    }

    /// Read a match outside any transaction
    pub fn match_by_id(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        match self
            .matches
            .get(id.to_bytes())
            .map_err(StoreError::backend)?
        {
            Some(value) => Ok(Some(decode_match(&value)?)),
            None => Ok(None),
        }
    }

    /// All matches, in key order
    pub fn all_matches(&self) -> Result<Vec<Match>, StoreError> {
        let mut out = Vec::new();
        for item in self.matches.iter() {
            let (_, value) = item.map_err(StoreError::backend)?;
            out.push(decode_match(&value)?);
        }
        Ok(out)
    }

    /// All rounds, in key order
    pub fn all_rounds(&self) -> Result<Vec<Round>, StoreError> {
        let mut out = Vec::new();
        for item in self.rounds.iter() {
            let (_, value) = item.map_err(StoreError::backend)?;
            out.push(decode_round(&value)?);
        }
        Ok(out)
    }

    fn read_match(&self, id: MatchId) -> Result<Match, StoreError> {
        self.match_by_id(id)?.ok_or(StoreError::MissingMatch(id))
    }

    fn read_round(&self, id: RoundId) -> Result<Round, StoreError> {
        match self.rounds.get(id.to_bytes()).map_err(StoreError::backend)? {
            Some(value) => decode_round(&value),
            None => Err(StoreError::MissingRound(id)),
        }
    }
}

/// Transaction over a `SledStore`
///
/// Writes accumulate in memory and hit disk only on [`SledTx::commit`];
/// dropping the transaction discards them.
pub struct SledTx<'a> {
    store: &'a SledStore,
    dirty: BTreeMap<MatchId, Match>,
}

impl SledTx<'_> {
    /// Apply every buffered write as one batch and flush
    pub fn commit(self) -> Result<(), StoreError> {
        if self.dirty.is_empty() {
            return Ok(());
        }
        let mut batch = sled::Batch::default();
        let written = self.dirty.len();
        for (id, m) in &self.dirty {
            let value = bincode::serialize(m).map_err(StoreError::codec)?;
            batch.insert(id.to_bytes().to_vec(), value);
        }
        self.store
            .matches
            .apply_batch(batch)
            .map_err(StoreError::backend)?;
        self.store.db.flush().map_err(StoreError::backend)?;
        debug!("committed {} match updates", written);
        Ok(())
    }
}

impl BracketTx for SledTx<'_> {
    fn round(&mut self, id: RoundId) -> Result<Round, StoreError> {
        // Rounds are never written by the engine; read through
        self.store.read_round(id)
    }

    fn match_by_id(&mut self, id: MatchId) -> Result<Match, StoreError> {
        if let Some(m) = self.dirty.get(&id) {
            return Ok(m.clone());
        }
        self.store.read_match(id)
    }

    fn children_of(&mut self, id: MatchId) -> Result<Vec<ChildEdge>, StoreError> {
        let mut entries: EdgeList = self
            .store
            .children
            .read()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        entries.sort_by_key(|(slot, child)| (*child, *slot));

        let mut edges = Vec::with_capacity(entries.len());
        for (slot, child_id) in entries {
            let child = self.match_by_id(child_id)?;
            let segment = self.store.read_round(child.round)?.segment;
            edges.push(ChildEdge {
                slot,
                segment,
                child,
            });
        }
        Ok(edges)
    }

    fn finals_match(&mut self, stage: StageId, depth: u32) -> Result<Option<Match>, StoreError> {
        let mut finals_round = None;
        for item in self.store.rounds.iter() {
            let (_, value) = item.map_err(StoreError::backend)?;
            let round = decode_round(&value)?;
            if round.stage == stage
                && round.segment == Some(BracketSegment::Finals)
                && round.depth == depth
            {
                finals_round = Some(round.id);
                break;
            }
        }
        let Some(round_id) = finals_round else {
            return Ok(None);
        };

        let mut ids = self
            .store
            .by_round
            .read()
            .get(&round_id)
            .cloned()
            .unwrap_or_default();
        ids.sort_unstable();
        match ids.first() {
            Some(&id) => Ok(Some(self.match_by_id(id)?)),
            None => Ok(None),
        }
    }

    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<(), StoreError> {
        let mut m = self.match_by_id(id)?;
        update.apply(&mut m);
        self.dirty.insert(id, m);
        Ok(())
    }
}

fn index_match(
    children: &mut AHashMap<MatchId, EdgeList>,
    by_round: &mut AHashMap<RoundId, Vec<MatchId>>,
    m: &Match,
) {
    for slot in [Slot::A, Slot::B] {
        if let Some(parent) = m.source(slot) {
            let edges = children.entry(parent).or_default();
            if !edges.contains(&(slot, m.id)) {
                edges.push((slot, m.id));
            }
        }
    }
    let members = by_round.entry(m.round).or_default();
    if !members.contains(&m.id) {
        members.push(m.id);
    }
}

fn decode_match(bytes: &[u8]) -> Result<Match, StoreError> {
    bincode::deserialize(bytes).map_err(StoreError::codec)
}

fn decode_round(bytes: &[u8]) -> Result<Round, StoreError> {
    bincode::deserialize(bytes).map_err(StoreError::codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::TeamId;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir) -> (SledStore, Match, Match) {
        let store = SledStore::open(dir.path()).unwrap();
        let stage = StageId::generate();
        let round = Round::new(stage, Some(BracketSegment::Winner), 1);
        let parent = Match::new(round.id);
        let mut child = Match::new(round.id);
        child.source_b = Some(parent.id);
        store.insert_round(&round).unwrap();
        store.insert_match(&parent).unwrap();
        store.insert_match(&child).unwrap();
        (store, parent, child)
    }

    #[test]
    fn committed_writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let team = TeamId::generate();
        let parent_id;
        {
            let (store, parent, _) = seeded(&dir);
            parent_id = parent.id;
            let mut tx = store.begin();
            tx.update_match(parent.id, MatchUpdate::set_slot(Slot::A, team))
                .unwrap();
            tx.commit().unwrap();
        }

        let store = SledStore::open(dir.path()).unwrap();
        assert_eq!(
            store.match_by_id(parent_id).unwrap().unwrap().team_a,
            Some(team)
        );
    }

    #[test]
    fn dropped_transaction_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (store, parent, _) = seeded(&dir);
        let mut tx = store.begin();
        tx.update_match(parent.id, MatchUpdate::set_slot(Slot::A, TeamId::generate()))
            .unwrap();
        drop(tx);
        assert_eq!(store.match_by_id(parent.id).unwrap().unwrap().team_a, None);
    }

    #[test]
    fn child_index_is_rebuilt_on_open() {
        let dir = TempDir::new().unwrap();
        let (parent_id, child_id);
        {
            let (_store, parent, child) = seeded(&dir);
            parent_id = parent.id;
            child_id = child.id;
        }

        let store = SledStore::open(dir.path()).unwrap();
        let mut tx = store.begin();
        let edges = tx.children_of(parent_id).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].slot, Slot::B);
        assert_eq!(edges[0].child.id, child_id);
    }

    #[test]
    fn children_observe_transaction_writes() {
        let dir = TempDir::new().unwrap();
        let (store, parent, child) = seeded(&dir);
        let team = TeamId::generate();

        let mut tx = store.begin();
        tx.update_match(child.id, MatchUpdate::set_slot(Slot::B, team))
            .unwrap();
        let edges = tx.children_of(parent.id).unwrap();
        assert_eq!(edges[0].child.team_b, Some(team));
    }

    #[test]
    fn finals_lookup_reads_rounds_tree() {
        let dir = TempDir::new().unwrap();
        let store = SledStore::open(dir.path()).unwrap();
        let stage = StageId::generate();
        let reset_round = Round::new(stage, Some(BracketSegment::Finals), 0);
        let reset = Match::new(reset_round.id);
        store.insert_round(&reset_round).unwrap();
        store.insert_match(&reset).unwrap();

        let mut tx = store.begin();
        assert_eq!(tx.finals_match(stage, 0).unwrap().unwrap().id, reset.id);
        assert!(tx.finals_match(stage, 1).unwrap().is_none());
    }
}
