//! Battle requests and the top-level evaluation entry point.
//!
//! A request names two armies by unit counts. Both are checked against the
//! stat table before anything is computed, so a bad request never produces a
//! partial result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::army::{Army, Force, StatError, StatTable};
use crate::combat::StrengthModifier;
use crate::resolve::{BattleResult, VictoryEngine};

/// Default precision cutoff in rounds.
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Largest accepted precision cutoff. Recursion depth grows with the cutoff.
pub const MAX_ROUNDS_LIMIT: u32 = 500;

/// Errors that can occur when setting up or running a battle.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("unknown unit type '{0}'")]
    UnknownUnit(String),

    #[error("invalid count '{count}' for unit type '{unit}'")]
    InvalidCount { unit: String, count: String },

    #[error("invalid battle request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Stats(#[from] StatError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Engine options for one battle evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds fought before the battle is scored as unresolved.
    pub max_rounds: u32,
    /// Whether the attacker's volley is resolved first within a round.
    /// Fire is simultaneous, so this does not change the result.
    pub attacker_first: bool,
    /// Cache equivalent states instead of re-exploring them.
    pub memoize: bool,
    /// Worker threads for the opening volley's branches (1 = sequential).
    pub threads: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            max_rounds: DEFAULT_MAX_ROUNDS,
            attacker_first: true,
            memoize: true,
            threads: 1,
        }
    }
}

impl BattleConfig {
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.max_rounds > MAX_ROUNDS_LIMIT {
            return Err(BattleError::InvalidRequest(format!(
                "max_rounds {} exceeds the limit of {}",
                self.max_rounds, MAX_ROUNDS_LIMIT
            )));
        }
        Ok(())
    }
}

/// Two armies and the options to fight them with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleRequest {
    pub attackers: Army,
    pub defenders: Army,
    #[serde(default)]
    pub config: BattleConfig,
}

impl BattleRequest {
    pub fn new(attackers: Army, defenders: Army) -> Self {
        BattleRequest {
            attackers,
            defenders,
            config: BattleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }
}

/// Builds both forces and evaluates the battle.
pub fn simulate_battle(request: &BattleRequest, stats: &StatTable) -> Result<BattleResult, BattleError> {
    request.config.validate()?;
    let attackers = Force::from_army(&request.attackers, stats)?;
    let defenders = Force::from_army(&request.defenders, stats)?;
    let engine = VictoryEngine::new(&request.config, StrengthModifier::from_stats(stats));

    debug!(
        attackers = %request.attackers,
        defenders = %request.defenders,
        max_rounds = request.config.max_rounds,
        "evaluating battle"
    );

    let result = if request.config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(request.config.threads)
            .build()
            .map_err(|e| BattleError::ThreadPool(e.to_string()))?;
        pool.install(|| engine.evaluate_parallel(&attackers, &defenders))
    } else {
        engine.evaluate(&attackers, &defenders)
    };

    debug!(
        attacker_win = result.attacker_win,
        unresolved = result.unresolved_mass,
        branches = result.outcomes.branches,
        "battle evaluated"
    );
    Ok(result)
}
