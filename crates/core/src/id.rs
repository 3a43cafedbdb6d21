//! Identifier newtypes
//!
//! Every entity in the bracket graph is addressed by a ULID. The newtypes
//! keep match/team/round/stage ids from being mixed up at call sites; the
//! engine never looks inside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            /// Raw 16-byte representation (used as a storage key)
            pub fn to_bytes(self) -> [u8; 16] {
                self.0.to_bytes()
            }

            /// Rebuild an id from its raw 16-byte representation
            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Ulid::from_bytes(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Ulid::from_str(s)?))
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }
    };
}

id_type!(
    /// Identity of a match (a node in the bracket graph)
    MatchId
);
id_type!(
    /// Identity of a team; the engine only ever compares these
    TeamId
);
id_type!(
    /// Identity of a round (a grouping of matches at one stage)
    RoundId
);
id_type!(
    /// Identity of a tournament stage (one bracket instance)
    StageId
);
