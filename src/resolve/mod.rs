//! Battle resolution.
//!
//! Explores every hit-count branch of a battle round by round and folds the
//! branch probabilities into a single attacker win probability.

pub mod memo;
pub mod outcome;
pub mod victory;

pub use memo::{StateKey, TranspositionTable};
pub use outcome::{BattleResult, Mass, OutcomeCounts};
pub use victory::VictoryEngine;
