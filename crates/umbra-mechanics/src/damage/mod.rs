//! Damage formula evaluation.
//!
//! Weapons and powers carry their damage as a short formula such as
//! `2d6 + successes` or `(1d10 + 3) * 2`. Evaluating one rolls every dice
//! group, fills in the attack's net successes, and does the arithmetic.
//! A formula that cannot be evaluated deals no damage and says why in its
//! breakdown instead of failing the attack.

pub mod expr;
pub mod notation;

pub use notation::{DiceGroupRoll, SUCCESS_PLACEHOLDERS};

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_GROUP_DICE;
use crate::dice::FaceSource;
use crate::error::FormulaError;

/// The evaluated damage of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// The formula as authored.
    pub formula: String,
    /// Every dice group rolled, in formula order.
    pub groups: Vec<DiceGroupRoll>,
    /// Successes substituted into the formula, when it used them and they
    /// were positive.
    pub successes: Option<u32>,
    /// The arithmetic that was actually evaluated.
    pub expression: String,
    /// Floored damage total. Zero when the formula is broken.
    pub total: i64,
    /// Why the formula could not be evaluated, if it could not.
    pub error: Option<FormulaError>,
}

impl DamageResult {
    /// Returns true if the formula failed to evaluate.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Human-readable account of how the total came about.
    ///
    /// `2d6 + successes | 2d6 [3, 5] = 8 | successes = 2 | total = 10`
    pub fn breakdown(&self) -> String {
        let mut parts = vec![self.formula.trim().to_string()];
        for group in &self.groups {
            let rolls: Vec<String> = group.rolls.iter().map(u32::to_string).collect();
            parts.push(format!(
                "{} [{}] = {}",
                group.notation,
                rolls.join(", "),
                group.sum
            ));
        }
        if let Some(successes) = self.successes {
            parts.push(format!("successes = {successes}"));
        }
        if let Some(error) = &self.error {
            parts.push(format!("formula error: {error}"));
        }
        parts.push(format!("total = {}", self.total));
        parts.join(" | ")
    }
}

impl std::fmt::Display for DamageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.breakdown())
    }
}

/// Evaluate a damage formula with the default dice limit.
///
/// Returns `None` for a blank formula: no damage applies, which is not the
/// same as a formula that comes out to zero.
pub fn evaluate_damage<F: FaceSource + ?Sized>(
    formula: &str,
    successes: u32,
    faces: &mut F,
) -> Option<DamageResult> {
    evaluate_damage_with_limit(formula, successes, DEFAULT_MAX_GROUP_DICE, faces)
}

/// Evaluate a damage formula, refusing dice groups larger than
/// `max_group_dice`.
pub fn evaluate_damage_with_limit<F: FaceSource + ?Sized>(
    formula: &str,
    successes: u32,
    max_group_dice: u32,
    faces: &mut F,
) -> Option<DamageResult> {
    if formula.trim().is_empty() {
        return None;
    }

    let expansion = match notation::expand(formula, successes, max_group_dice, faces) {
        Ok(expansion) => expansion,
        Err((error, groups)) => {
            tracing::warn!(formula, %error, "damage formula rejected");
            return Some(DamageResult {
                formula: formula.to_string(),
                groups,
                successes: None,
                expression: String::new(),
                total: 0,
                error: Some(error),
            });
        }
    };

    let expression = expr::sanitize(&expansion.text);
    let (total, error) = match expr::evaluate(&expression) {
        Ok(total) => (total, None),
        Err(error) => {
            tracing::warn!(
                formula,
                expression = %expression,
                %error,
                "damage formula failed to evaluate"
            );
            (0, Some(error))
        }
    };

    tracing::debug!(
        formula,
        expression = %expression,
        groups = expansion.groups.len(),
        total,
        "damage evaluated"
    );

    Some(DamageResult {
        formula: formula.to_string(),
        groups: expansion.groups,
        successes: (expansion.uses_successes && successes > 0).then_some(successes),
        expression,
        total,
        error,
    })
}
