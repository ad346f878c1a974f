//! Per-die results and the resolved outcome of a pool.

use serde::{Deserialize, Serialize};

use super::{DiceKind, Face};

/// The result of one die in a resolved pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    /// The face the die showed.
    pub face: Face,
    /// Successes scored by the face before madness.
    pub successes: u32,
    /// Successes left on this die after madness cancellation.
    pub kept: u32,
}

impl DieRoll {
    /// How many of this die's successes were cancelled.
    pub fn cancelled(&self) -> u32 {
        self.successes - self.kept
    }
}

/// The resolved result of rolling a pool.
///
/// `dice` holds soul dice first, then assimilation dice, each group in the
/// order it was rolled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Individual die results in roll order.
    pub dice: Vec<DieRoll>,
    /// Difficulty the pool was rolled against.
    pub difficulty: i32,
    /// Successes scored by soul dice before madness.
    pub soul_successes: u32,
    /// Successes scored by assimilation dice before madness.
    pub assimilation_successes: u32,
    /// Number of assimilation faces showing 1.
    pub madness_triggers: u32,
    /// Successes removed by madness.
    pub cancelled: u32,
    /// Successes remaining after madness.
    pub total_successes: u32,
    /// Zero successes with at least one face of 1.
    pub botch: bool,
}

impl RollOutcome {
    /// Face values rolled by dice of one kind, in roll order.
    pub fn faces(&self, kind: DiceKind) -> Vec<u32> {
        self.dice
            .iter()
            .filter(|d| d.face.kind == kind)
            .map(|d| d.face.value)
            .collect()
    }

    /// Soul face values in roll order.
    pub fn soul_faces(&self) -> Vec<u32> {
        self.faces(DiceKind::Soul)
    }

    /// Assimilation face values in roll order.
    pub fn assimilation_faces(&self) -> Vec<u32> {
        self.faces(DiceKind::Assimilation)
    }

    /// Successes before madness cancellation.
    pub fn raw_successes(&self) -> u32 {
        self.soul_successes + self.assimilation_successes
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool was a botch.
    pub fn is_botch(&self) -> bool {
        self.botch
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |values: Vec<u32>| {
            values
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "soul [{}] assimilation [{}] = {} success{}",
            join(self.soul_faces()),
            join(self.assimilation_faces()),
            self.total_successes,
            if self.total_successes == 1 { "" } else { "es" },
        )?;
        if self.cancelled > 0 {
            write!(f, " ({} lost to madness)", self.cancelled)?;
        }
        if self.botch {
            write!(f, " BOTCH")?;
        }
        Ok(())
    }
}
