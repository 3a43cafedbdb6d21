//! Core types for the bracket advancement engine
//!
//! This crate provides:
//! - ULID-backed identifier newtypes
//! - Match and Round records (the bracket graph nodes)
//! - Slot/segment vocabulary and partial-update types
//! - The error taxonomy shared by the store and the engine

pub mod error;
pub mod id;
pub mod matches;
pub mod round;

// Re-exports
pub use error::{AdvanceError, StoreError};
pub use id::{MatchId, RoundId, StageId, TeamId};
pub use matches::{Field, Match, MatchUpdate, Slot};
pub use round::{BracketSegment, Round};
