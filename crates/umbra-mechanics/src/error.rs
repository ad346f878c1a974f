//! Error types for the mechanics engine.

use serde::{Deserialize, Serialize};

/// Errors that can occur while configuring or describing a roll.
///
/// Rolling itself never fails: bad dice counts are clamped and broken damage
/// formulas are reported inside the [`DamageResult`](crate::DamageResult).
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice pool description could not be parsed.
    #[error("invalid pool: {0}")]
    InvalidPool(String),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A damage formula could not be evaluated.
    #[error("formula error: {0}")]
    Formula(#[from] FormulaError),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Why a damage formula failed to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum FormulaError {
    /// Nothing was left to evaluate after sanitizing the formula.
    #[error("empty expression")]
    EmptyExpression,

    /// A token appeared where it is not allowed.
    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken {
        /// The offending token text.
        token: String,
        /// Byte offset in the sanitized expression.
        position: usize,
    },

    /// The expression ended while an operand was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Parentheses do not match up.
    #[error("unbalanced parentheses")]
    UnbalancedParens,

    /// A division by zero was attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// A dice group asks for more dice than the table allows.
    #[error("dice group '{notation}' exceeds the limit of {limit} dice")]
    TooManyDice {
        /// The dice notation as written in the formula.
        notation: String,
        /// The configured per-group limit.
        limit: u32,
    },

    /// Parentheses or signs nest deeper than the evaluator allows.
    #[error("expression nests deeper than {limit} levels")]
    TooDeep {
        /// The nesting limit.
        limit: usize,
    },

    /// A literal or intermediate value does not fit the evaluator's range.
    #[error("number out of range")]
    Overflow,
}
