//! Exact victory probabilities by recursive round resolution.
//!
//! A round is two volleys. The side that fires first rolls against the
//! other, and its hits are held back as `pending`. The second side then rolls
//! from its own pre-round strength, takes the pending hits, and deals its own
//! hits back. Both sides' casualties therefore land together before the next
//! round, as in simultaneous fire. Every reachable hit count is explored and
//! weighted by its probability.
//!
//! Terminal states, checked in this order:
//! - attackers gone: defender win (mutual annihilation goes to the defender)
//! - defenders gone: attacker win
//! - round past the cap: unresolved, scored as 0.5
//! - neither side can score a hit: unresolved, without playing out the
//!   remaining rounds

use rayon::prelude::*;
use tracing::{debug, trace};

use super::memo::{StateKey, TranspositionTable};
use super::outcome::{BattleResult, Mass, OutcomeCounts};
use crate::army::{Force, Side};
use crate::battle::BattleConfig;
use crate::combat::{apply_hits, HitDistribution, StrengthModifier};

/// Computes attacker win probabilities for pairs of forces.
#[derive(Debug, Clone)]
pub struct VictoryEngine {
    modifier: StrengthModifier,
    max_rounds: u32,
    first: Side,
    memoize: bool,
}

impl VictoryEngine {
    pub fn new(config: &BattleConfig, modifier: StrengthModifier) -> Self {
        VictoryEngine {
            modifier,
            max_rounds: config.max_rounds,
            first: if config.attacker_first {
                Side::Attacker
            } else {
                Side::Defender
            },
            memoize: config.memoize,
        }
    }

    /// Hit distribution of one volley fired by `force` on `side`.
    pub fn volley(&self, force: &Force, side: Side) -> HitDistribution {
        HitDistribution::new(&self.modifier.hit_probabilities(force, side))
    }

    /// Evaluates a battle on the calling thread.
    pub fn evaluate(&self, attackers: &Force, defenders: &Force) -> BattleResult {
        let mut search = Search::new(self);
        let mass = search.evaluate(attackers, defenders, 1, self.first, 0);
        search.log_memo();
        BattleResult::from_mass(mass, search.counts)
    }

    /// Evaluates a battle, fanning the opening volley's hit counts out over
    /// the current rayon pool.
    ///
    /// Each branch keeps its own transposition table and counters; they are
    /// merged after all branches finish. The result matches [`evaluate`]
    /// up to floating-point rounding.
    ///
    /// [`evaluate`]: VictoryEngine::evaluate
    pub fn evaluate_parallel(&self, attackers: &Force, defenders: &Force) -> BattleResult {
        let mut root = Search::new(self);
        root.counts.branches += 1;
        if let Some(mass) = root.terminal(attackers, defenders, 1) {
            return BattleResult::from_mass(mass, root.counts);
        }

        let opening = self.volley(side_force(attackers, defenders, self.first), self.first);
        let outcomes: Vec<(usize, f64)> = opening.outcomes().collect();
        let branches: Vec<(f64, Mass, OutcomeCounts)> = outcomes
            .into_par_iter()
            .map(|(hits, p)| {
                let mut search = Search::new(self);
                let mass = search.evaluate(attackers, defenders, 1, self.first.opponent(), hits);
                trace!(hits, p, branches = search.counts.branches, "opening branch done");
                search.log_memo();
                (p, mass, search.counts)
            })
            .collect();

        let mut mass = Mass::default();
        let mut counts = root.counts;
        for (p, branch, branch_counts) in branches {
            mass += branch * p;
            counts += branch_counts;
        }
        BattleResult::from_mass(mass, counts)
    }
}

/// Per-evaluation recursion state.
struct Search<'a> {
    engine: &'a VictoryEngine,
    memo: Option<TranspositionTable>,
    counts: OutcomeCounts,
}

impl<'a> Search<'a> {
    fn new(engine: &'a VictoryEngine) -> Self {
        Search {
            engine,
            memo: engine.memoize.then(TranspositionTable::new),
            counts: OutcomeCounts::default(),
        }
    }

    /// Classifies and counts a terminal state, if this is one.
    fn terminal(&mut self, attackers: &Force, defenders: &Force, round: u32) -> Option<Mass> {
        if attackers.is_empty() {
            self.counts.defender_wins += 1;
            Some(Mass::DEFENDER_WIN)
        } else if defenders.is_empty() {
            self.counts.attacker_wins += 1;
            Some(Mass::ATTACKER_WIN)
        } else if round > self.engine.max_rounds {
            self.counts.unresolved += 1;
            Some(Mass::UNRESOLVED)
        } else {
            None
        }
    }

    /// True when no unit on either side has any chance to hit.
    fn stalemate(&self, attackers: &Force, defenders: &Force) -> bool {
        let modifier = &self.engine.modifier;
        [(attackers, Side::Attacker), (defenders, Side::Defender)]
            .into_iter()
            .all(|(force, side)| modifier.hit_probabilities(force, side).iter().all(|&p| p == 0.0))
    }

    fn log_memo(&self) {
        if let Some(memo) = &self.memo {
            debug!(states = memo.states(), hits = memo.hits(), "transposition table");
        }
    }

    fn evaluate(
        &mut self,
        attackers: &Force,
        defenders: &Force,
        round: u32,
        active: Side,
        pending: usize,
    ) -> Mass {
        self.counts.branches += 1;
        if let Some(mass) = self.terminal(attackers, defenders, round) {
            return mass;
        }
        if pending == 0 && active == self.engine.first && self.stalemate(attackers, defenders) {
            self.counts.unresolved += 1;
            return Mass::UNRESOLVED;
        }

        let key = self
            .memo
            .is_some()
            .then(|| StateKey::new(attackers, defenders, round, active, pending));
        if let (Some(memo), Some(key)) = (self.memo.as_mut(), key.as_ref()) {
            if let Some(mass) = memo.get(key) {
                return mass;
            }
        }

        let mass = if active == self.engine.first {
            self.first_volley(attackers, defenders, round, active)
        } else {
            self.second_volley(attackers, defenders, round, active, pending)
        };

        if let (Some(memo), Some(key)) = (self.memo.as_mut(), key) {
            memo.insert(key, mass);
        }
        mass
    }

    /// The first side fires. Its hits are carried to the second volley unapplied.
    fn first_volley(&mut self, attackers: &Force, defenders: &Force, round: u32, active: Side) -> Mass {
        let volley = self
            .engine
            .volley(side_force(attackers, defenders, active), active);
        let mut mass = Mass::default();
        for (hits, p) in volley.outcomes() {
            mass += self.evaluate(attackers, defenders, round, active.opponent(), hits) * p;
        }
        mass
    }

    /// The second side fires from full strength, then both sides take their
    /// losses and the next round begins.
    fn second_volley(
        &mut self,
        attackers: &Force,
        defenders: &Force,
        round: u32,
        active: Side,
        pending: usize,
    ) -> Mass {
        let other = active.opponent();
        let own = side_force(attackers, defenders, active);
        let volley = self.engine.volley(own, active);
        let own_after = apply_hits(own, pending, active);

        let mut mass = Mass::default();
        for (hits, p) in volley.outcomes() {
            let other_after = apply_hits(side_force(attackers, defenders, other), hits, other);
            let (next_attackers, next_defenders) = match active {
                Side::Attacker => (&own_after, &other_after),
                Side::Defender => (&other_after, &own_after),
            };
            mass += self.evaluate(next_attackers, next_defenders, round + 1, other, 0) * p;
        }
        mass
    }
}

fn side_force<'f>(attackers: &'f Force, defenders: &'f Force, side: Side) -> &'f Force {
    match side {
        Side::Attacker => attackers,
        Side::Defender => defenders,
    }
}
