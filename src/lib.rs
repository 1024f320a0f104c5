//! Battle-odds library.
//!
//! Computes exact attacker win probabilities for dice-resolved attrition
//! battles. Exposes the unit and force types, the per-volley combat
//! mechanics, the recursive resolver, and army gauntlets for use by the
//! binaries and integration tests.

pub mod army;
pub mod battle;
pub mod combat;
pub mod gauntlet;
pub mod resolve;

pub use army::{Army, Force, Side, StatTable, Unit};
pub use battle::{simulate_battle, BattleConfig, BattleError, BattleRequest};
pub use resolve::{BattleResult, OutcomeCounts, VictoryEngine};
