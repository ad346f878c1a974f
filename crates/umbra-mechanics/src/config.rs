//! Table-wide settings shared by every roll.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{MechError, MechResult};

/// Difficulty used when a check does not override it.
pub const DEFAULT_DIFFICULTY: i32 = 6;

/// Default cap on the dice count of a single `NdM` group.
pub const DEFAULT_MAX_GROUP_DICE: u32 = 1_000;

/// Configuration for a table of rolls.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// RNG seed for reproducible rolls. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Target number a d10 face must reach to score.
    pub difficulty: i32,
    /// Largest `N` accepted in an `NdM` damage group.
    pub max_group_dice: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: DEFAULT_DIFFICULTY,
            max_group_dice: DEFAULT_MAX_GROUP_DICE,
        }
    }
}

impl TableConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the difficulty (clamped to 1-10).
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty.clamp(1, 10);
        self
    }

    /// Set the per-group dice limit for damage formulas.
    pub fn with_max_group_dice(mut self, max: u32) -> MechResult<Self> {
        if max == 0 {
            return Err(MechError::InvalidConfig(
                "max_group_dice must be at least 1".to_string(),
            ));
        }
        self.max_group_dice = max;
        Ok(self)
    }

    /// Build the random generator for this table.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
