//! Pool resolution: rolling, scoring, madness, and botches.
//!
//! A pool is rolled soul dice first, then assimilation dice. Each face is
//! scored on its kind's table, madness triggers then strip successes from
//! the best dice, and a pool left with nothing after showing any 1 is a
//! botch.

pub mod madness;
pub mod table;

pub use madness::cancel_successes;
pub use table::face_successes;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DIFFICULTY;
use crate::dice::{DiceKind, DieRoll, Face, FaceSource, PoolSpec, RollOutcome};

/// How a resolved pool reads at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// At least one success survived madness.
    Success {
        /// Successes after madness.
        successes: u32,
    },
    /// No successes and no 1s rolled.
    Failure,
    /// No successes and at least one 1 rolled.
    Botch,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { successes: 1 } => write!(f, "Success (1 success)"),
            Self::Success { successes } => write!(f, "Success ({successes} successes)"),
            Self::Failure => write!(f, "Failure"),
            Self::Botch => write!(f, "Botch"),
        }
    }
}

impl RollOutcome {
    /// Classify the outcome.
    pub fn verdict(&self) -> Verdict {
        if self.botch {
            Verdict::Botch
        } else if self.total_successes == 0 {
            Verdict::Failure
        } else {
            Verdict::Success {
                successes: self.total_successes,
            }
        }
    }
}

/// Roll a pool from raw counts.
///
/// Negative counts roll no dice of that kind.
pub fn roll_pool<F: FaceSource + ?Sized>(
    soul: i32,
    assimilation: i32,
    difficulty: i32,
    faces: &mut F,
) -> RollOutcome {
    resolve_pool(PoolSpec::new(soul, assimilation), difficulty, faces)
}

/// Roll a pool at the default difficulty.
pub fn roll_pool_default<F: FaceSource + ?Sized>(
    soul: i32,
    assimilation: i32,
    faces: &mut F,
) -> RollOutcome {
    roll_pool(soul, assimilation, DEFAULT_DIFFICULTY, faces)
}

/// Roll every die in `pool` and score the result.
pub fn resolve_pool<F: FaceSource + ?Sized>(
    pool: PoolSpec,
    difficulty: i32,
    faces: &mut F,
) -> RollOutcome {
    let mut rolled = Vec::with_capacity(pool.count() as usize);
    for _ in 0..pool.soul {
        rolled.push(Face::soul(faces.roll_face()));
    }
    for _ in 0..pool.assimilation {
        rolled.push(Face::assimilation(faces.roll_face()));
    }
    score_faces(&rolled, difficulty)
}

/// Score an already-rolled set of faces.
///
/// `rolled` is expected in roll order; cancellation ties go to earlier
/// entries.
pub fn score_faces(rolled: &[Face], difficulty: i32) -> RollOutcome {
    let base: Vec<u32> = rolled
        .iter()
        .map(|face| face_successes(*face, difficulty))
        .collect();

    let mut soul_successes = 0;
    let mut assimilation_successes = 0;
    let mut madness_triggers = 0;
    for (face, successes) in rolled.iter().zip(&base) {
        if face.is_madness_trigger() {
            madness_triggers += 1;
        }
        match face.kind {
            DiceKind::Soul => soul_successes += successes,
            DiceKind::Assimilation => assimilation_successes += successes,
        }
    }

    let mut kept = base.clone();
    let cancelled = cancel_successes(&mut kept, madness_triggers);
    let total_successes: u32 = kept.iter().sum();
    let botch = total_successes == 0 && rolled.iter().any(|face| face.is_one());

    let dice = rolled
        .iter()
        .zip(base.iter().zip(&kept))
        .map(|(face, (successes, kept))| DieRoll {
            face: *face,
            successes: *successes,
            kept: *kept,
        })
        .collect();

    tracing::debug!(
        difficulty,
        dice = rolled.len(),
        raw = soul_successes + assimilation_successes,
        madness_triggers,
        cancelled,
        total = total_successes,
        botch,
        "pool resolved"
    );

    RollOutcome {
        dice,
        difficulty,
        soul_successes,
        assimilation_successes,
        madness_triggers,
        cancelled,
        total_successes,
        botch,
    }
}
