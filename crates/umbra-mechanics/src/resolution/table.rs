//! Success table for pool dice.
//!
//! | Face     | Soul | Assimilation |
//! |----------|------|--------------|
//! | 1        | 0    | 0            |
//! | below d  | 0    | 0            |
//! | d..=9    | 1    | 2            |
//! | 10       | 2    | 3            |

use crate::dice::{DiceKind, Face};

/// Successes scored by a single face at the given difficulty.
///
/// A 1 never scores, even when the difficulty is 1 or lower. A 10 always
/// scores, even when the difficulty is above 10.
pub fn face_successes(face: Face, difficulty: i32) -> u32 {
    let scores = match face.value {
        1 => false,
        10 => true,
        value => i64::from(value) >= i64::from(difficulty),
    };
    if !scores {
        return 0;
    }
    match (face.kind, face.value == 10) {
        (DiceKind::Soul, false) => 1,
        (DiceKind::Soul, true) => 2,
        (DiceKind::Assimilation, false) => 2,
        (DiceKind::Assimilation, true) => 3,
    }
}
