//! Army compositions as requested by callers.
//!
//! An `Army` is a validated mapping from unit type name to count. It can be
//! parsed from the compact text form `Infantry=3,Tank=2` used on the command
//! line, or deserialized from a JSON object of name to integer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stats::StatTable;
use crate::battle::BattleError;

/// Largest number of units one side may bring to a battle.
pub const MAX_ARMY_UNITS: u64 = 10_000;

/// Unit counts keyed by type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Army {
    counts: BTreeMap<String, u32>,
}

impl Army {
    pub fn new() -> Self {
        Army::default()
    }

    /// Builds an army from signed counts, rejecting negatives.
    pub fn from_counts<I, S>(counts: I) -> Result<Self, BattleError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut army = Army::new();
        for (name, count) in counts {
            let name = name.into();
            let count = u32::try_from(count).map_err(|_| BattleError::InvalidCount {
                unit: name.clone(),
                count: count.to_string(),
            })?;
            army.add(name, count)?;
        }
        Ok(army)
    }

    /// Adds `count` units of `name`, merging with any existing entry.
    pub fn add(&mut self, name: impl Into<String>, count: u32) -> Result<(), BattleError> {
        let name = name.into();
        let current = self.count(&name);
        let total = current
            .checked_add(count)
            .ok_or_else(|| BattleError::InvalidCount {
                count: format!("{}+{}", current, count),
                unit: name.clone(),
            })?;
        self.counts.insert(name, total);
        Ok(())
    }

    /// Builder that sets the count of `name`, replacing any existing entry.
    pub fn with(mut self, name: impl Into<String>, count: u32) -> Self {
        self.counts.insert(name.into(), count);
        self
    }

    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Iterates over `(name, count)` in sorted name order, skipping zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts
            .iter()
            .filter(|(_, &c)| c > 0)
            .map(|(n, &c)| (n.as_str(), c))
    }

    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Total purchase cost of the army.
    pub fn cost(&self, stats: &StatTable) -> Result<u32, BattleError> {
        let mut total: u32 = 0;
        for (name, count) in self.iter() {
            total = stats
                .get(name)?
                .cost
                .checked_mul(count)
                .and_then(|c| total.checked_add(c))
                .ok_or_else(|| BattleError::InvalidRequest(format!("cost of {} overflows", self)))?;
        }
        Ok(total)
    }

    /// Checks that every unit type exists in the stat table and that the army
    /// is no larger than [`MAX_ARMY_UNITS`].
    pub fn validate(&self, stats: &StatTable) -> Result<(), BattleError> {
        for name in self.counts.keys() {
            stats.get(name)?;
        }
        let total = self.total_units();
        if total > MAX_ARMY_UNITS {
            return Err(BattleError::InvalidRequest(format!(
                "army has {} units, at most {} are supported",
                total, MAX_ARMY_UNITS
            )));
        }
        Ok(())
    }
}

impl FromStr for Army {
    type Err = BattleError;

    /// Parses `Name=count` entries separated by commas. A bare name counts as one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut army = Army::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, count) = match entry.split_once('=') {
                Some((name, count)) => (name.trim(), count.trim()),
                None => (entry, "1"),
            };
            if name.is_empty() {
                return Err(BattleError::InvalidRequest(format!(
                    "missing unit name in '{}'",
                    entry
                )));
            }
            let count: u32 = count.parse().map_err(|_| BattleError::InvalidCount {
                unit: name.to_string(),
                count: count.to_string(),
            })?;
            army.add(name, count)?;
        }
        Ok(army)
    }
}

impl fmt::Display for Army {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, count) in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}={}", name, count)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_form() {
        let army: Army = "Infantry=3, Tank=2,Artillery".parse().unwrap();
        assert_eq!(army.count("Infantry"), 3);
        assert_eq!(army.count("Tank"), 2);
        assert_eq!(army.count("Artillery"), 1);
        assert_eq!(army.total_units(), 6);
        assert_eq!(army.to_string(), "Artillery=1,Infantry=3,Tank=2");
    }

    #[test]
    fn repeated_names_merge() {
        let army: Army = "Infantry=1,Infantry=2".parse().unwrap();
        assert_eq!(army.count("Infantry"), 3);
    }

    #[test]
    fn rejects_negative_and_fractional_counts() {
        for bad in ["Infantry=-1", "Infantry=1.5", "Infantry=x"] {
            match bad.parse::<Army>() {
                Err(BattleError::InvalidCount { unit, .. }) => assert_eq!(unit, "Infantry"),
                other => panic!("{}: expected InvalidCount, got {:?}", bad, other),
            }
        }
        assert!(matches!(
            Army::from_counts([("Tank", -2)]),
            Err(BattleError::InvalidCount { .. })
        ));
    }

    #[test]
    fn repeated_names_that_overflow_are_invalid() {
        match "Infantry=4294967295,Infantry=1".parse::<Army>() {
            Err(BattleError::InvalidCount { unit, count }) => {
                assert_eq!(unit, "Infantry");
                assert_eq!(count, "4294967295+1");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
        let mut army = Army::new().with("Tank", u32::MAX);
        assert!(army.add("Tank", 1).is_err());
        assert_eq!(army.count("Tank"), u32::MAX);
    }

    #[test]
    fn totals_past_u32_do_not_wrap() {
        let army: Army = "Infantry=4294967295,Tank=1".parse().unwrap();
        assert_eq!(army.total_units(), 4_294_967_296);
        let stats = StatTable::builtin();
        assert!(matches!(army.cost(&stats), Err(BattleError::InvalidRequest(_))));
        assert!(matches!(army.validate(&stats), Err(BattleError::InvalidRequest(_))));
    }

    #[test]
    fn validate_caps_army_size() {
        let stats = StatTable::builtin();
        let limit = MAX_ARMY_UNITS as u32;
        assert!(Army::new().with("Infantry", limit).validate(&stats).is_ok());
        assert!(Army::new()
            .with("Infantry", limit)
            .with("Tank", 1)
            .validate(&stats)
            .is_err());
    }

    #[test]
    fn rejects_missing_name() {
        assert!(matches!(
            "=3".parse::<Army>(),
            Err(BattleError::InvalidRequest(_))
        ));
    }

    #[test]
    fn empty_text_is_empty_army() {
        let army: Army = "".parse().unwrap();
        assert!(army.is_empty());
    }

    #[test]
    fn zero_counts_are_skipped() {
        let army = Army::new().with("Infantry", 0).with("Tank", 1);
        assert_eq!(army.iter().count(), 1);
        assert_eq!(army.to_string(), "Tank=1");
    }

    #[test]
    fn cost_sums_unit_costs() {
        let stats = StatTable::builtin();
        let army = Army::new().with("Infantry", 2).with("Tank", 1);
        assert_eq!(army.cost(&stats).unwrap(), 12);
        let bad = Army::new().with("Zeppelin", 1);
        assert!(matches!(bad.cost(&stats), Err(BattleError::UnknownUnit(_))));
        assert!(bad.validate(&stats).is_err());
    }

    #[test]
    fn deserializes_from_json_object() {
        let army: Army = serde_json::from_str(r#"{"Infantry": 3, "Tank": 1}"#).unwrap();
        assert_eq!(army.count("Infantry"), 3);
        assert_eq!(army.count("Tank"), 1);
        assert!(serde_json::from_str::<Army>(r#"{"Infantry": -1}"#).is_err());
        assert!(serde_json::from_str::<Army>(r#"{"Infantry": 1.5}"#).is_err());
    }
}
