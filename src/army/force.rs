//! Forces: the ordered units one side brings to a battle.
//!
//! A `Force` is a value. Every transformation (casualties, bonuses) works on a
//! copy and hands back a new force, so sibling branches of the battle
//! recursion can each evolve the same starting force independently.

use std::fmt;

use super::request::Army;
use super::stats::StatTable;
use super::unit::Unit;
use crate::battle::BattleError;

/// An ordered sequence of living units.
///
/// Order only matters as the casualty tie-break: the first matching unit wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Force {
    units: Vec<Unit>,
}

impl Force {
    /// Creates a force from units, dropping any with no health left.
    pub fn new(units: Vec<Unit>) -> Self {
        let units = units.into_iter().filter(|u| u.health > 0).collect();
        Force { units }
    }

    pub fn empty() -> Self {
        Force::default()
    }

    /// Builds a force from an army, grouped by type in the army's name order.
    ///
    /// Every unit type is looked up before any unit is created, so an unknown
    /// name fails the whole request.
    pub fn from_army(army: &Army, stats: &StatTable) -> Result<Self, BattleError> {
        army.validate(stats)?;
        let mut units = Vec::with_capacity(army.total_units() as usize);
        for (name, count) in army.iter() {
            let unit = stats.spawn(name)?;
            units.extend(std::iter::repeat(unit).take(count as usize));
        }
        Ok(Force { units })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total remaining hit points across all units.
    pub fn total_health(&self) -> u32 {
        self.units.iter().map(|u| u32::from(u.health)).sum()
    }

    /// Number of units of the named type.
    pub fn count(&self, name: &str) -> usize {
        self.units.iter().filter(|u| &*u.name == name).count()
    }
}

impl<'a> IntoIterator for &'a Force {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

impl fmt::Display for Force {
    /// Lists units in order, marking damaged ones with their health.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units.is_empty() {
            return write!(f, "-");
        }
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", unit.name)?;
            if unit.is_damaged() {
                write!(f, " ({}/{})", unit.health, unit.max_health)?;
            }
        }
        Ok(())
    }
}
