//! Dice notation and the successes placeholder.
//!
//! Walks a damage formula once, rolling every `NdM` group and replacing the
//! successes placeholder with the check's successes. Everything else is
//! copied through untouched for the arithmetic stage to sanitize.

use serde::{Deserialize, Serialize};

use crate::dice::FaceSource;
use crate::error::FormulaError;

/// Placeholder words replaced by the check's successes (matched
/// case-insensitively). Content tables use the Portuguese spelling.
pub const SUCCESS_PLACEHOLDERS: &[&str] = &["successes", "sucessos"];

/// One rolled `NdM` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceGroupRoll {
    /// The group as written in the formula, e.g. `2d6`.
    pub notation: String,
    /// Number of dice rolled.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
    /// Each die's value in roll order.
    pub rolls: Vec<u32>,
    /// Sum of `rolls`.
    pub sum: u64,
}

/// A formula with dice rolled and the placeholder filled in.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// The formula with every group replaced by its sum.
    pub text: String,
    /// Rolled groups in formula order.
    pub groups: Vec<DiceGroupRoll>,
    /// Whether the formula mentions the successes placeholder.
    pub uses_successes: bool,
}

/// Roll the dice groups and substitute the placeholder in `formula`.
///
/// Groups whose dice count exceeds `max_group_dice` stop the expansion.
/// The groups rolled before that point are returned alongside the error.
pub fn expand<F: FaceSource + ?Sized>(
    formula: &str,
    successes: u32,
    max_group_dice: u32,
    faces: &mut F,
) -> Result<Expansion, (FormulaError, Vec<DiceGroupRoll>)> {
    let chars: Vec<char> = formula.chars().collect();
    let mut out = Expansion::default();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let count_end = digits_end(&chars, i);
            let is_dice = chars
                .get(count_end)
                .is_some_and(|c| c.eq_ignore_ascii_case(&'d'))
                && chars.get(count_end + 1).is_some_and(char::is_ascii_digit);
            if is_dice {
                let sides_end = digits_end(&chars, count_end + 1);
                let notation: String = chars[i..sides_end].iter().collect();
                let count_text: String = chars[i..count_end].iter().collect();
                let sides_text: String = chars[count_end + 1..sides_end].iter().collect();
                // Only overflow fails to parse here, and overflow is positive.
                let count = count_text.parse::<u64>().unwrap_or(u64::MAX);
                let sides = sides_text.parse::<u32>().unwrap_or(u32::MAX);
                if count == 0 || sides == 0 {
                    // `0d6` and `2d0` are not dice; they go through as text.
                    out.text.push_str(&notation);
                    i = sides_end;
                    continue;
                }
                if count > u64::from(max_group_dice) {
                    return Err((
                        FormulaError::TooManyDice {
                            notation,
                            limit: max_group_dice,
                        },
                        out.groups,
                    ));
                }
                let group = roll_group(notation, count as u32, sides, faces);
                out.text.push_str(&group.sum.to_string());
                out.groups.push(group);
                i = sides_end;
            } else {
                out.text.extend(&chars[i..count_end]);
                i = count_end;
            }
            continue;
        }

        if let Some(len) = placeholder_at(&chars, i) {
            out.uses_successes = true;
            out.text.push_str(&successes.to_string());
            i += len;
            continue;
        }

        out.text.push(chars[i]);
        i += 1;
    }

    Ok(out)
}

fn digits_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn placeholder_at(chars: &[char], start: usize) -> Option<usize> {
    SUCCESS_PLACEHOLDERS.iter().find_map(|word| {
        let len = word.chars().count();
        let window = chars.get(start..start + len)?;
        window
            .iter()
            .zip(word.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
            .then_some(len)
    })
}

fn roll_group<F: FaceSource + ?Sized>(
    notation: String,
    count: u32,
    sides: u32,
    faces: &mut F,
) -> DiceGroupRoll {
    let rolls: Vec<u32> = (0..count).map(|_| faces.roll_die(sides)).collect();
    let sum = rolls.iter().map(|&v| u64::from(v)).sum();
    DiceGroupRoll {
        notation,
        count,
        sides,
        rolls,
        sum,
    }
}
