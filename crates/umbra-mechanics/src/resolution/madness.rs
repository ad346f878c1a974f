//! Madness cancellation.
//!
//! Each madness trigger removes one success from whichever die currently
//! holds the most. The target is re-chosen after every cancellation. Ties
//! go to the die rolled first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Cancel up to `triggers` successes from `scores` in place.
///
/// `scores` holds the per-die successes in roll order. Returns how many
/// successes were actually cancelled, which is less than `triggers` when
/// the pool runs dry.
pub fn cancel_successes(scores: &mut [u32], triggers: u32) -> u32 {
    let mut heap: BinaryHeap<(u32, Reverse<usize>)> = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > 0)
        .map(|(i, s)| (*s, Reverse(i)))
        .collect();

    let mut cancelled = 0;
    for _ in 0..triggers {
        let Some((value, Reverse(index))) = heap.pop() else {
            break;
        };
        let left = value - 1;
        scores[index] = left;
        cancelled += 1;
        if left > 0 {
            heap.push((left, Reverse(index)));
        }
    }
    cancelled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_triggers_no_change() {
        let mut scores = vec![2, 1, 3];
        assert_eq!(cancel_successes(&mut scores, 0), 0);
        assert_eq!(scores, vec![2, 1, 3]);
    }

    #[test]
    fn hits_largest_die() {
        let mut scores = vec![1, 3, 2];
        assert_eq!(cancel_successes(&mut scores, 1), 1);
        assert_eq!(scores, vec![1, 2, 2]);
    }

    #[test]
    fn retargets_after_each_cancellation() {
        let mut scores = vec![1, 3, 2];
        assert_eq!(cancel_successes(&mut scores, 3), 3);
        // 3 -> 2, then the tie goes to index 1, then index 2
        assert_eq!(scores, vec![1, 1, 1]);
    }

    #[test]
    fn tie_goes_to_first_rolled() {
        let mut scores = vec![2, 2];
        cancel_successes(&mut scores, 1);
        assert_eq!(scores, vec![1, 2]);
    }

    #[test]
    fn stops_when_pool_is_dry() {
        let mut scores = vec![1, 0, 1];
        assert_eq!(cancel_successes(&mut scores, 5), 2);
        assert_eq!(scores, vec![0, 0, 0]);
    }

    #[test]
    fn empty_pool() {
        let mut scores: Vec<u32> = Vec::new();
        assert_eq!(cancel_successes(&mut scores, 2), 0);
    }
}
