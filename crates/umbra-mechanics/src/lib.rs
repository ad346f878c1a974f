//! Dice-pool combat resolution engine for Umbra.
//!
//! Provides soul and assimilation dice pools with madness cancellation and
//! botch detection, a damage formula evaluator for `NdM`-style weapon
//! formulas, and the attack pipeline that chains attack, defense, damage,
//! and absorption. Every roll draws from an injected [`FaceSource`], so
//! results can be seeded or scripted.

pub mod combat;
pub mod config;
pub mod damage;
pub mod dice;
pub mod error;
pub mod odds;
pub mod resolution;

pub use combat::{AttackRequest, AttackResolution, resolve_attack};
pub use config::{DEFAULT_DIFFICULTY, TableConfig};
pub use damage::{DamageResult, DiceGroupRoll, evaluate_damage, evaluate_damage_with_limit};
pub use dice::{DiceKind, DieRoll, Face, FaceSource, PoolSpec, RollOutcome, ScriptedFaces};
pub use error::{FormulaError, MechError, MechResult};
pub use odds::{PoolOdds, estimate_odds};
pub use resolution::{Verdict, resolve_pool, roll_pool, roll_pool_default, score_faces};
