//! Monte-Carlo odds for a pool.
//!
//! Madness makes exact odds awkward to derive by hand, so they are
//! estimated by rolling the pool many times with the same source the
//! table uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dice::{FaceSource, PoolSpec};
use crate::resolution;

/// Estimated outcome distribution of a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolOdds {
    /// The pool that was sampled.
    pub pool: PoolSpec,
    /// Difficulty used.
    pub difficulty: i32,
    /// Number of rolls sampled.
    pub trials: u32,
    /// Average successes after madness.
    pub mean_successes: f64,
    /// Share of rolls with at least one success.
    pub success_rate: f64,
    /// Share of rolls that botched.
    pub botch_rate: f64,
    /// How many rolls ended on each success total.
    pub histogram: BTreeMap<u32, u32>,
}

impl PoolOdds {
    /// Share of rolls that reached at least `successes`.
    pub fn at_least(&self, successes: u32) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let hits: u32 = self.histogram.range(successes..).map(|(_, n)| n).sum();
        f64::from(hits) / f64::from(self.trials)
    }
}

/// Roll `pool` `trials` times and tally the results.
pub fn estimate_odds<F: FaceSource + ?Sized>(
    pool: PoolSpec,
    difficulty: i32,
    trials: u32,
    faces: &mut F,
) -> PoolOdds {
    let mut histogram = BTreeMap::new();
    let mut total: u64 = 0;
    let mut successes = 0u32;
    let mut botches = 0u32;

    for _ in 0..trials {
        let outcome = resolution::resolve_pool(pool, difficulty, faces);
        total += u64::from(outcome.total_successes);
        if outcome.total_successes > 0 {
            successes += 1;
        }
        if outcome.botch {
            botches += 1;
        }
        *histogram.entry(outcome.total_successes).or_insert(0) += 1;
    }

    let rate = |n: u32| {
        if trials == 0 {
            0.0
        } else {
            f64::from(n) / f64::from(trials)
        }
    };
    let mean_successes = if trials == 0 {
        0.0
    } else {
        total as f64 / f64::from(trials)
    };

    PoolOdds {
        pool,
        difficulty,
        trials,
        mean_successes,
        success_rate: rate(successes),
        botch_rate: rate(botches),
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedFaces;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scripted_tens_always_score() {
        let mut faces = ScriptedFaces::new(vec![10]);
        let odds = estimate_odds(PoolSpec::new(2, 1), 6, 50, &mut faces);
        assert_eq!(odds.trials, 50);
        assert!((odds.mean_successes - 7.0).abs() < f64::EPSILON);
        assert!((odds.success_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(odds.botch_rate, 0.0);
        assert_eq!(odds.histogram.get(&7), Some(&50));
    }

    #[test]
    fn alternating_botch_and_success() {
        // 1s1a pool: [6, 1] -> 1 cancelled -> botch; [6, 6] -> 3
        let mut faces = ScriptedFaces::new(vec![6, 1, 6, 6]);
        let odds = estimate_odds(PoolSpec::new(1, 1), 6, 10, &mut faces);
        assert!((odds.botch_rate - 0.5).abs() < f64::EPSILON);
        assert!((odds.success_rate - 0.5).abs() < f64::EPSILON);
        assert!((odds.at_least(3) - 0.5).abs() < f64::EPSILON);
        assert!((odds.at_least(0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_pool_never_succeeds() {
        let mut rng = StdRng::seed_from_u64(3);
        let odds = estimate_odds(PoolSpec::empty(), 6, 100, &mut rng);
        assert_eq!(odds.success_rate, 0.0);
        assert_eq!(odds.botch_rate, 0.0);
        assert_eq!(odds.histogram.get(&0), Some(&100));
    }

    #[test]
    fn zero_trials() {
        let mut rng = StdRng::seed_from_u64(3);
        let odds = estimate_odds(PoolSpec::new(3, 0), 6, 0, &mut rng);
        assert_eq!(odds.mean_successes, 0.0);
        assert!(odds.histogram.is_empty());
        assert_eq!(odds.at_least(1), 0.0);
    }

    #[test]
    fn seeded_estimate_is_plausible() {
        let mut rng = StdRng::seed_from_u64(42);
        let odds = estimate_odds(PoolSpec::new(1, 0), 6, 10_000, &mut rng);
        // One soul die scores on 6-10: 50%, mean 0.6
        assert!((odds.success_rate - 0.5).abs() < 0.03);
        assert!((odds.mean_successes - 0.6).abs() < 0.05);
        // A single soul die botches on a 1: 10%
        assert!((odds.botch_rate - 0.1).abs() < 0.02);
    }
}
