//! Shared bracket fixtures for integration tests
#![allow(dead_code)]

use bracket_core::{BracketSegment, Match, MatchId, Round, StageId, TeamId};
use bracket_engine::AdvancementResult;
use bracket_store::{MemoryStore, SledStore};
use std::path::Path;

/// A bracket graph as plain data, loadable into any store
pub struct BracketData {
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
}

impl BracketData {
    pub fn into_memory(&self) -> MemoryStore {
        let store = MemoryStore::new();
        for round in &self.rounds {
            store.insert_round(round.clone());
        }
        for m in &self.matches {
            store.insert_match(m.clone());
        }
        store
    }

    pub fn into_sled(&self, path: &Path) -> SledStore {
        let store = SledStore::open(path).unwrap();
        for round in &self.rounds {
            store.insert_round(round).unwrap();
        }
        for m in &self.matches {
            store.insert_match(m).unwrap();
        }
        store
    }
}

/// Four-team double elimination:
///
/// ```text
/// WB r1:  m1 (t0 v t3)   m2 (t1 v t2)
/// WB r2:  m3 (m1.W v m2.W)
/// LB r1:  m4 (m1.L v m2.L)
/// LB r2:  m5 (m4.W v m3.L)          <- loser bracket final
/// F  d1:  f1 (m3.W v m5.W*)         <- * edge only if `finals_edge`
/// F  d0:  f2 (reset final, no pedigree edges)
/// ```
pub struct FourTeams {
    pub stage: StageId,
    pub teams: [TeamId; 4],
    pub m1: MatchId,
    pub m2: MatchId,
    pub m3: MatchId,
    pub m4: MatchId,
    pub m5: MatchId,
    pub f1: MatchId,
    pub f2: MatchId,
    pub data: BracketData,
}

pub fn four_team_double_elim(finals_edge: bool) -> FourTeams {
    let stage = StageId::generate();
    let teams = [
        TeamId::generate(),
        TeamId::generate(),
        TeamId::generate(),
        TeamId::generate(),
    ];

    let wb_r1 = Round::new(stage, Some(BracketSegment::Winner), 2);
    let wb_r2 = Round::new(stage, Some(BracketSegment::Winner), 1);
    let lb_r1 = Round::new(stage, Some(BracketSegment::Loser), 2);
    let lb_r2 = Round::new(stage, Some(BracketSegment::Loser), 1);
    let fin_1 = Round::new(stage, Some(BracketSegment::Finals), 1);
    let fin_0 = Round::new(stage, Some(BracketSegment::Finals), 0);

    let mut m1 = Match::new(wb_r1.id);
    m1.team_a = Some(teams[0]);
    m1.team_b = Some(teams[3]);
    let mut m2 = Match::new(wb_r1.id);
    m2.team_a = Some(teams[1]);
    m2.team_b = Some(teams[2]);

    let mut m3 = Match::new(wb_r2.id);
    m3.source_a = Some(m1.id);
    m3.source_b = Some(m2.id);

    let mut m4 = Match::new(lb_r1.id);
    m4.source_a = Some(m1.id);
    m4.source_b = Some(m2.id);

    let mut m5 = Match::new(lb_r2.id);
    m5.source_a = Some(m4.id);
    m5.source_b = Some(m3.id);

    let mut f1 = Match::new(fin_1.id);
    f1.source_a = Some(m3.id);
    if finals_edge {
        f1.source_b = Some(m5.id);
    }

    let f2 = Match::new(fin_0.id);

    FourTeams {
        stage,
        teams,
        m1: m1.id,
        m2: m2.id,
        m3: m3.id,
        m4: m4.id,
        m5: m5.id,
        f1: f1.id,
        f2: f2.id,
        data: BracketData {
            rounds: vec![wb_r1, wb_r2, lb_r1, lb_r2, fin_1, fin_0],
            matches: vec![m1, m2, m3, m4, m5, f1, f2],
        },
    }
}

/// Winner-bracket column with three consecutive byes:
/// root (real) -> bye1 -> bye2 -> bye3 -> target (real)
pub struct ByeColumn {
    pub teams: [TeamId; 2],
    pub root: MatchId,
    pub byes: [MatchId; 3],
    pub target: MatchId,
    pub data: BracketData,
}

pub fn bye_column() -> ByeColumn {
    let stage = StageId::generate();
    let teams = [TeamId::generate(), TeamId::generate()];
    let rounds: Vec<Round> = (0..5)
        .map(|i| Round::new(stage, Some(BracketSegment::Winner), 5 - i))
        .collect();

    let mut root = Match::new(rounds[0].id);
    root.team_a = Some(teams[0]);
    root.team_b = Some(teams[1]);

    let mut prev = root.id;
    let mut byes = Vec::new();
    for round in rounds.iter().take(4).skip(1) {
        let mut bye = Match::new(round.id);
        bye.is_bye = true;
        bye.source_a = Some(prev);
        prev = bye.id;
        byes.push(bye);
    }

    let mut target = Match::new(rounds[4].id);
    target.source_a = Some(prev);

    ByeColumn {
        teams,
        root: root.id,
        byes: [byes[0].id, byes[1].id, byes[2].id],
        target: target.id,
        data: BracketData {
            rounds,
            matches: {
                let mut all = vec![root];
                all.extend(byes);
                all.push(target);
                all
            },
        },
    }
}

/// Run one advancement in its own committed transaction
pub fn run_advance(
    store: &MemoryStore,
    id: MatchId,
    winner: TeamId,
    loser: Option<TeamId>,
) -> AdvancementResult {
    let mut tx = store.begin();
    let result = bracket_engine::advance(&mut tx, id, winner, loser).unwrap();
    tx.commit();
    result
}

pub fn run_advance_sled(
    store: &SledStore,
    id: MatchId,
    winner: TeamId,
    loser: Option<TeamId>,
) -> AdvancementResult {
    let mut tx = store.begin();
    let result = bracket_engine::advance(&mut tx, id, winner, loser).unwrap();
    tx.commit().unwrap();
    result
}

/// The graph-wide properties every committed state must satisfy
pub fn assert_graph_invariants(matches: &[Match]) {
    for m in matches {
        if let Some(winner) = m.winner {
            assert!(
                m.team_a == Some(winner) || m.team_b == Some(winner),
                "match {} has winner {} outside its slots",
                m.id,
                winner
            );
        }
        if let (Some(a), Some(b)) = (m.team_a, m.team_b) {
            assert_ne!(a, b, "match {} holds the same team in both slots", m.id);
        }
    }
}
