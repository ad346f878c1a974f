//! Attack resolution.
//!
//! An attack is three pool rolls and one damage formula, always in this
//! order: the attacker's pool, the defender's defense pool, the weapon's
//! damage with the attacker's net successes, then the defender's
//! absorption pool. A broken damage formula deals no damage but never stops
//! the other rolls from being made and reported.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DIFFICULTY, DEFAULT_MAX_GROUP_DICE, TableConfig};
use crate::damage::{self, DamageResult};
use crate::dice::{FaceSource, PoolSpec, RollOutcome};
use crate::resolution;

/// Everything needed to resolve one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// The attacker's pool (attribute, skill, and bonuses already summed).
    pub attack: PoolSpec,
    /// The defender's defense pool.
    pub defense: PoolSpec,
    /// The defender's absorption pool.
    pub absorption: PoolSpec,
    /// The weapon's damage formula. Blank means the attack deals no damage.
    pub damage_formula: String,
    /// Difficulty for all three pools.
    pub difficulty: i32,
    /// Largest dice group accepted in the damage formula.
    pub max_group_dice: u32,
}

impl AttackRequest {
    /// Create a request at the default difficulty.
    pub fn new(
        attack: PoolSpec,
        defense: PoolSpec,
        absorption: PoolSpec,
        damage_formula: impl Into<String>,
    ) -> Self {
        Self {
            attack,
            defense,
            absorption,
            damage_formula: damage_formula.into(),
            difficulty: DEFAULT_DIFFICULTY,
            max_group_dice: DEFAULT_MAX_GROUP_DICE,
        }
    }

    /// Override the difficulty.
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Take difficulty and dice limits from a table configuration.
    pub fn with_config(mut self, config: &TableConfig) -> Self {
        self.difficulty = config.difficulty;
        self.max_group_dice = config.max_group_dice;
        self
    }
}

/// The full result of an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResolution {
    /// The attacker's roll.
    pub attack: RollOutcome,
    /// The defender's defense roll.
    pub defense: RollOutcome,
    /// The defender's absorption roll.
    pub absorption: RollOutcome,
    /// The evaluated damage formula, or `None` if the weapon has none.
    pub damage: Option<DamageResult>,
    /// Attack successes minus defense successes, floored at zero.
    pub net_successes: u32,
    /// Damage total before absorption. Zero for a missing or broken formula.
    pub weapon_damage: i64,
    /// Damage that gets through: weapon damage minus absorption, floored at zero.
    pub final_damage: u64,
}

impl AttackResolution {
    /// Returns true if the damage formula was present but broken.
    pub fn has_formula_error(&self) -> bool {
        self.damage.as_ref().is_some_and(DamageResult::is_error)
    }
}

impl std::fmt::Display for AttackResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "attack: {} -> {}", self.attack, self.attack.verdict())?;
        writeln!(f, "defense: {} -> {}", self.defense, self.defense.verdict())?;
        writeln!(f, "net successes: {}", self.net_successes)?;
        match &self.damage {
            Some(damage) => writeln!(f, "damage: {damage}")?,
            None => writeln!(f, "damage: none")?,
        }
        writeln!(f, "absorption: {}", self.absorption)?;
        write!(f, "final damage: {}", self.final_damage)
    }
}

/// Resolve an attack.
pub fn resolve_attack<F: FaceSource + ?Sized>(
    request: &AttackRequest,
    faces: &mut F,
) -> AttackResolution {
    let attack = resolution::resolve_pool(request.attack, request.difficulty, faces);
    let defense = resolution::resolve_pool(request.defense, request.difficulty, faces);
    let net_successes = attack
        .total_successes
        .saturating_sub(defense.total_successes);

    let damage = damage::evaluate_damage_with_limit(
        &request.damage_formula,
        net_successes,
        request.max_group_dice,
        faces,
    );
    let weapon_damage = damage.as_ref().map_or(0, |d| d.total);

    let absorption = resolution::resolve_pool(request.absorption, request.difficulty, faces);
    let final_damage = weapon_damage
        .saturating_sub(i64::from(absorption.total_successes))
        .max(0)
        .unsigned_abs();

    tracing::debug!(
        attack = attack.total_successes,
        defense = defense.total_successes,
        net_successes,
        weapon_damage,
        absorbed = absorption.total_successes,
        final_damage,
        "attack resolved"
    );

    AttackResolution {
        attack,
        defense,
        absorption,
        damage,
        net_successes,
        weapon_damage,
        final_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedFaces;
    use crate::error::FormulaError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn request(formula: &str) -> AttackRequest {
        AttackRequest::new(
            PoolSpec::new(2, 1),
            PoolSpec::new(1, 0),
            PoolSpec::new(1, 0),
            formula,
        )
    }

    #[test]
    fn full_pipeline_consumes_faces_in_order() {
        // attack: soul 10, 6 / assimilation 7 -> 2 + 1 + 2 = 5
        // defense: soul 8 -> 1
        // damage: 2d6 -> 4, 3 plus 4 net successes
        // absorption: soul 9 -> 1
        let mut faces = ScriptedFaces::new(vec![10, 6, 7, 8, 4, 3, 9]);
        let result = resolve_attack(&request("2d6 + successes"), &mut faces);

        assert_eq!(result.attack.total_successes, 5);
        assert_eq!(result.defense.total_successes, 1);
        assert_eq!(result.net_successes, 4);
        let damage = result.damage.as_ref().unwrap();
        assert_eq!(damage.groups[0].rolls, vec![4, 3]);
        assert_eq!(damage.successes, Some(4));
        assert_eq!(result.weapon_damage, 11);
        assert_eq!(result.absorption.soul_faces(), vec![9]);
        assert_eq!(result.final_damage, 10);
        assert_eq!(faces.consumed(), 7);
    }

    #[test]
    fn defense_beats_attack() {
        // attack: 2, 3 / 4 -> 0; defense: 10 -> 2; absorption: 2 -> 0
        let mut faces = ScriptedFaces::new(vec![2, 3, 4, 10, 2]);
        let result = resolve_attack(&request("successes + 1"), &mut faces);
        assert_eq!(result.net_successes, 0);
        assert_eq!(result.weapon_damage, 1);
        assert_eq!(result.final_damage, 1);
    }

    #[test]
    fn absorption_floors_at_zero() {
        // attack: 6, 2 / 2 -> 1; defense: 2 -> 0; damage 1; absorption: 10 -> 2
        let mut faces = ScriptedFaces::new(vec![6, 2, 2, 2, 10]);
        let result = resolve_attack(&request("1"), &mut faces);
        assert_eq!(result.net_successes, 1);
        assert_eq!(result.weapon_damage, 1);
        assert_eq!(result.final_damage, 0);
    }

    #[test]
    fn blank_formula_still_rolls_everything() {
        let mut faces = ScriptedFaces::new(vec![7, 7, 7, 7, 7]);
        let result = resolve_attack(&request("  "), &mut faces);
        assert!(result.damage.is_none());
        assert_eq!(result.weapon_damage, 0);
        assert_eq!(result.final_damage, 0);
        assert_eq!(result.absorption.count(), 1);
        assert_eq!(faces.consumed(), 5);
    }

    #[test]
    fn broken_formula_degrades_to_zero() {
        let mut faces = ScriptedFaces::new(vec![10, 10, 10, 2, 3]);
        let result = resolve_attack(&request("2 +* successes"), &mut faces);
        assert!(result.has_formula_error());
        assert_eq!(result.weapon_damage, 0);
        assert_eq!(result.final_damage, 0);
        assert_eq!(result.net_successes, 7);
        assert_eq!(result.absorption.soul_faces(), vec![3]);
    }

    #[test]
    fn negative_formula_total_is_not_negative_damage() {
        let mut faces = ScriptedFaces::new(vec![2]);
        let result = resolve_attack(&request("1 - 5"), &mut faces);
        assert_eq!(result.weapon_damage, -4);
        assert_eq!(result.final_damage, 0);
    }

    #[test]
    fn difficulty_applies_to_every_pool() {
        let req = AttackRequest::new(
            PoolSpec::new(1, 0),
            PoolSpec::new(1, 0),
            PoolSpec::new(1, 0),
            "successes",
        )
        .with_difficulty(9);
        // attack 8 fails at 9, defense 9 scores, absorption 8 fails
        let mut faces = ScriptedFaces::new(vec![8, 9, 8]);
        let result = resolve_attack(&req, &mut faces);
        assert_eq!(result.attack.total_successes, 0);
        assert_eq!(result.defense.total_successes, 1);
        assert_eq!(result.absorption.total_successes, 0);
        assert_eq!(result.attack.difficulty, 9);
    }

    #[test]
    fn config_sets_group_limit() {
        let config = TableConfig::default()
            .with_difficulty(6)
            .with_max_group_dice(2)
            .unwrap();
        let req = request("3d6").with_config(&config);
        let mut faces = ScriptedFaces::new(vec![6]);
        let result = resolve_attack(&req, &mut faces);
        assert!(matches!(
            result.damage.as_ref().and_then(|d| d.error.clone()),
            Some(FormulaError::TooManyDice { limit: 2, .. })
        ));
    }

    #[test]
    fn seeded_attacks_are_reproducible() {
        let req = AttackRequest::new(
            PoolSpec::new(4, 2),
            PoolSpec::new(3, 1),
            PoolSpec::new(2, 0),
            "2d8 + successes",
        );
        let a = resolve_attack(&req, &mut StdRng::seed_from_u64(11));
        let b = resolve_attack(&req, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn display_lists_every_step() {
        let mut faces = ScriptedFaces::new(vec![10, 6, 7, 8, 4, 3, 9]);
        let text = resolve_attack(&request("2d6 + successes"), &mut faces).to_string();
        assert!(text.starts_with("attack: "));
        assert!(text.contains("net successes: 4"));
        assert!(text.contains("damage: 2d6 + successes | 2d6 [4, 3] = 7"));
        assert!(text.ends_with("final damage: 10"));
    }
}
