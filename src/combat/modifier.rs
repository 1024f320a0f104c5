//! Composition bonuses and effective hit probabilities.
//!
//! Some unit types raise the attack of other types fighting alongside them
//! (artillery supporting infantry, fighters and tanks supporting tactical
//! bombers). Bonuses are paired one-for-one: each granting unit boosts one
//! receiving unit, and no unit is boosted twice. They are recomputed from the
//! base stats on every call and never written back onto a unit.

use std::sync::Arc;

use crate::army::{Force, Side, StatTable, DIE_FACES};

/// One granting type and what it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BonusRule {
    provider: Arc<str>,
    target: Arc<str>,
    amount: u8,
}

/// Derives per-unit hit probabilities for a force, applying composition bonuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrengthModifier {
    rules: Vec<BonusRule>,
}

impl StrengthModifier {
    /// A modifier with no bonuses: every unit fires at its printed stat.
    pub fn none() -> Self {
        StrengthModifier::default()
    }

    /// Collects the bonus rules declared in a stat table.
    ///
    /// Rules are applied in granting-type name order, then declaration order.
    pub fn from_stats(stats: &StatTable) -> Self {
        let rules = stats
            .iter()
            .flat_map(|(name, unit)| {
                unit.bonuses.iter().map(move |b| BonusRule {
                    provider: Arc::from(name),
                    target: Arc::from(b.target.as_str()),
                    amount: b.amount,
                })
            })
            .collect();
        StrengthModifier { rules }
    }

    /// Effective attack value of every unit, in force order.
    pub fn effective_attacks(&self, force: &Force) -> Vec<u8> {
        let units = force.units();
        let mut attacks: Vec<u8> = units.iter().map(|u| u.attack).collect();
        let mut boosted = vec![false; units.len()];

        for rule in &self.rules {
            let providers = units.iter().filter(|u| u.name == rule.provider).count();
            let mut granted = 0;
            for (i, unit) in units.iter().enumerate() {
                if granted == providers {
                    break;
                }
                if unit.name == rule.target && !boosted[i] {
                    boosted[i] = true;
                    attacks[i] = attacks[i].saturating_add(rule.amount).min(DIE_FACES);
                    granted += 1;
                }
            }
        }
        attacks
    }

    /// Probability that each unit scores a hit when firing on `side`.
    ///
    /// Attackers fire at their boosted attack; defenders at their defense.
    pub fn hit_probabilities(&self, force: &Force, side: Side) -> Vec<f64> {
        let values = match side {
            Side::Attacker => self.effective_attacks(force),
            Side::Defender => force.iter().map(|u| u.defense).collect(),
        };
        values
            .into_iter()
            .map(|v| f64::from(v.min(DIE_FACES)) / f64::from(DIE_FACES))
            .collect()
    }
}
