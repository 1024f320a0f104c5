//! Army gauntlets: enumerate candidate armies and play them off.
//!
//! Every army attacks every other army once, so each plays `n - 1` battles on
//! each side. Standings report the mean win rate as attacker, as defender,
//! and the average of the two.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, trace};

use crate::army::{Army, Force, StatTable};
use crate::battle::{BattleConfig, BattleError};
use crate::combat::StrengthModifier;
use crate::resolve::VictoryEngine;

/// One army's record across a round robin. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub army: Army,
    pub attack_win_rate: f64,
    pub defense_win_rate: f64,
    pub combined_win_rate: f64,
}

/// For each unit type, as many units of that type as `budget` buys.
///
/// Types costing more than the budget are skipped.
pub fn single_type_armies(stats: &StatTable, budget: u32) -> Vec<Army> {
    stats
        .iter()
        .filter_map(|(name, unit)| {
            let count = budget / unit.cost;
            (count > 0).then(|| Army::new().with(name, count))
        })
        .collect()
}

/// Every distinct mix of unit types whose cost is within `budget` but could
/// not afford one more of the cheapest unit.
///
/// Armies with room for another cheap unit are strictly weaker than the same
/// army plus that unit, so they are left out.
pub fn armies_within_budget(stats: &StatTable, budget: u32) -> Vec<Army> {
    let cheapest = match stats.cheapest_cost() {
        Some(c) => c,
        None => return Vec::new(),
    };
    let floor = budget.saturating_sub(cheapest);
    let types: Vec<(&str, u32)> = stats.iter().map(|(n, s)| (n, s.cost)).collect();

    let mut armies = Vec::new();
    let mut counts = vec![0u32; types.len()];
    enumerate_mixes(&types, 0, budget, &mut counts, &mut |counts: &[u32], spent: u32| {
        if spent > floor {
            let army = types
                .iter()
                .zip(counts)
                .filter(|(_, &c)| c > 0)
                .fold(Army::new(), |army, ((name, _), &c)| army.with(*name, c));
            armies.push(army);
        }
    });
    armies
}

fn enumerate_mixes<F>(types: &[(&str, u32)], idx: usize, remaining: u32, counts: &mut [u32], emit: &mut F)
where
    F: FnMut(&[u32], u32),
{
    if idx == types.len() {
        let spent: u32 = types.iter().zip(counts.iter()).map(|((_, cost), c)| cost * c).sum();
        emit(&*counts, spent);
        return;
    }
    let cost = types[idx].1;
    for count in 0..=remaining / cost {
        counts[idx] = count;
        enumerate_mixes(types, idx + 1, remaining - count * cost, counts, emit);
    }
    counts[idx] = 0;
}

/// Plays every ordered pair of armies and ranks them by combined win rate.
///
/// Each battle is evaluated sequentially; the battles themselves run in
/// parallel when `config.threads > 1`.
pub fn round_robin(
    armies: &[Army],
    stats: &StatTable,
    config: &BattleConfig,
) -> Result<Vec<Standing>, BattleError> {
    config.validate()?;
    if armies.len() < 2 {
        return Ok(Vec::new());
    }
    let forces = armies
        .iter()
        .map(|a| Force::from_army(a, stats))
        .collect::<Result<Vec<_>, _>>()?;
    let engine = VictoryEngine::new(config, StrengthModifier::from_stats(stats));
    let n = armies.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
        .collect();

    info!(armies = n, battles = pairs.len(), "starting round robin");
    let start = Instant::now();

    let fight = |&(i, j): &(usize, usize)| {
        let result = engine.evaluate(&forces[i], &forces[j]);
        trace!(attacker = %armies[i], defender = %armies[j], p = result.attacker_win, "battle done");
        (i, j, result.attacker_win)
    };
    let results: Vec<(usize, usize, f64)> = if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| BattleError::ThreadPool(e.to_string()))?;
        pool.install(|| pairs.par_iter().map(fight).collect())
    } else {
        pairs.iter().map(fight).collect()
    };

    info!(
        battles = results.len(),
        secs = start.elapsed().as_secs_f64(),
        "round robin complete"
    );

    let mut attack = vec![0.0; n];
    let mut defense = vec![0.0; n];
    for (i, j, p) in results {
        attack[i] += p;
        defense[j] += 1.0 - p;
    }

    let games = (n - 1) as f64;
    let mut standings: Vec<Standing> = armies
        .iter()
        .enumerate()
        .map(|(i, army)| {
            let attack_win_rate = percent(attack[i] / games);
            let defense_win_rate = percent(defense[i] / games);
            Standing {
                army: army.clone(),
                attack_win_rate,
                defense_win_rate,
                combined_win_rate: round2((attack_win_rate + defense_win_rate) / 2.0),
            }
        })
        .collect();
    standings.sort_by(|a, b| b.combined_win_rate.total_cmp(&a.combined_win_rate));
    Ok(standings)
}

fn percent(rate: f64) -> f64 {
    round2(rate * 100.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
