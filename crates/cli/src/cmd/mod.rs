//! CLI subcommands

pub mod advance;
pub mod byes;
pub mod import;
pub mod retract;
pub mod show;
pub mod verify;

use anyhow::{anyhow, Result};
use bracket_core::{MatchId, StageId, TeamId};

pub(crate) fn parse_match_id(raw: &str) -> Result<MatchId> {
    raw.parse()
        .map_err(|_| anyhow!("invalid match id: {}", raw))
}

pub(crate) fn parse_team_id(raw: &str) -> Result<TeamId> {
    raw.parse().map_err(|_| anyhow!("invalid team id: {}", raw))
}

pub(crate) fn parse_stage_id(raw: &str) -> Result<StageId> {
    raw.parse()
        .map_err(|_| anyhow!("invalid stage id: {}", raw))
}
