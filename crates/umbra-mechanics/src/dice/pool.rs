//! Pool sizes and pool notation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// How many dice of each kind a check rolls.
///
/// Counts are never negative: anything below zero is treated as "no dice
/// of that kind".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Number of soul dice.
    pub soul: u32,
    /// Number of assimilation dice.
    pub assimilation: u32,
}

impl PoolSpec {
    /// Create a pool from raw counts, clamping negatives to zero.
    pub fn new(soul: i32, assimilation: i32) -> Self {
        Self {
            soul: clamp_count(soul),
            assimilation: clamp_count(assimilation),
        }
    }

    /// A pool with no dice at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pool from character sheet values.
    ///
    /// Attribute, skill, and situational bonus each add soul dice; the
    /// assimilation dice come from the character's assimilation rating.
    pub fn from_sheet(attribute: i32, skill: i32, bonus: i32, assimilation: i32) -> Self {
        let soul = attribute.saturating_add(skill).saturating_add(bonus);
        Self::new(soul, assimilation)
    }

    /// Add (or with a negative value, remove) soul dice.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        let soul = i64::from(self.soul) + i64::from(bonus);
        self.soul = u32::try_from(soul.max(0)).unwrap_or(u32::MAX);
        self
    }

    /// Total number of dice in the pool.
    pub fn count(&self) -> u32 {
        self.soul.saturating_add(self.assimilation)
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

fn clamp_count(n: i32) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

impl std::fmt::Display for PoolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s{}a", self.soul, self.assimilation)
    }
}

/// Parse pool notation.
///
/// Accepted forms: `"5s2a"`, `"5s"`, `"2a"`, `"5/2"` (soul/assimilation),
/// and a bare `"5"` (soul only). Whitespace and case are ignored.
impl FromStr for PoolSpec {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if text.is_empty() {
            return Err(MechError::InvalidPool("empty pool".to_string()));
        }

        if let Some((soul, assimilation)) = text.split_once('/') {
            return Ok(Self::new(parse_count(soul, s)?, parse_count(assimilation, s)?));
        }

        if let Ok(n) = text.parse::<i32>() {
            return Ok(Self::new(n, 0));
        }

        let mut pool = Self::empty();
        let mut seen_soul = false;
        let mut seen_assimilation = false;
        let mut digits = String::new();
        for c in text.chars() {
            match c {
                '0'..='9' | '-' => digits.push(c),
                's' if !seen_soul => {
                    pool.soul = clamp_count(parse_count(&digits, s)?);
                    seen_soul = true;
                    digits.clear();
                }
                'a' if !seen_assimilation => {
                    pool.assimilation = clamp_count(parse_count(&digits, s)?);
                    seen_assimilation = true;
                    digits.clear();
                }
                _ => {
                    return Err(MechError::InvalidPool(format!(
                        "unexpected '{c}' in '{s}'"
                    )));
                }
            }
        }
        if !digits.is_empty() {
            return Err(MechError::InvalidPool(format!(
                "count '{digits}' in '{s}' has no kind (use s or a)"
            )));
        }
        Ok(pool)
    }
}

fn parse_count(digits: &str, whole: &str) -> Result<i32, MechError> {
    digits
        .parse::<i32>()
        .map_err(|_| MechError::InvalidPool(format!("bad dice count '{digits}' in '{whole}'")))
}
