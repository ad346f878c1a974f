//! Dice kinds, faces, pools, and face sources.
//!
//! Every check rolls ten-sided dice of two kinds. Soul dice score on the
//! lower table; assimilation dice score higher but every face of 1 they
//! show is a madness trigger.

pub mod pool;
pub mod roll;
pub mod source;

pub use pool::PoolSpec;
pub use roll::{DieRoll, RollOutcome};
pub use source::{FaceSource, ScriptedFaces};

use serde::{Deserialize, Serialize};

/// Number of sides on a pool die.
pub const POOL_DIE_SIDES: u32 = 10;

/// The kind of a pool die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceKind {
    /// Soul die: 1 success at difficulty, 2 on a 10.
    Soul,
    /// Assimilation die: 2 successes at difficulty, 3 on a 10, madness on a 1.
    Assimilation,
}

impl DiceKind {
    /// Short lowercase label used in notation and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Soul => "soul",
            Self::Assimilation => "assimilation",
        }
    }
}

impl std::fmt::Display for DiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single rolled d10 face tagged with the kind of die that showed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// The value shown, always in `1..=10`.
    pub value: u32,
    /// Which kind of die was rolled.
    pub kind: DiceKind,
}

impl Face {
    /// Create a face, clamping the value into `1..=10`.
    pub fn new(value: u32, kind: DiceKind) -> Self {
        Self {
            value: value.clamp(1, POOL_DIE_SIDES),
            kind,
        }
    }

    /// A soul face.
    pub fn soul(value: u32) -> Self {
        Self::new(value, DiceKind::Soul)
    }

    /// An assimilation face.
    pub fn assimilation(value: u32) -> Self {
        Self::new(value, DiceKind::Assimilation)
    }

    /// Whether the face shows a 1, of either kind.
    pub fn is_one(self) -> bool {
        self.value == 1
    }

    /// Whether this face triggers a madness cancellation.
    pub fn is_madness_trigger(self) -> bool {
        match self.kind {
            DiceKind::Soul => false,
            DiceKind::Assimilation => self.value == 1,
        }
    }
}
