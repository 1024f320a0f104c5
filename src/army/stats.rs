//! Static unit statistics.
//!
//! The stat table maps a unit type name to its attack, defense, cost, and
//! health, plus any composition bonuses the type grants to other types. It is
//! loaded once per battle setup from JSON:
//!
//! ```json
//! {
//!   "Infantry":  { "attack": 1, "defense": 2, "cost": 3, "health": 1 },
//!   "Artillery": { "attack": 2, "defense": 2, "cost": 4, "health": 1,
//!                  "bonuses": [{ "target": "Infantry", "amount": 1 }] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::unit::{Unit, DIE_FACES};
use crate::battle::BattleError;

/// The roster shipped with the crate.
const BUILTIN_UNITS: &str = include_str!("../../data/units.json");

/// Errors that can occur while loading a stat table.
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error("malformed stat table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read stat table '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{unit}: {stat} {value} is outside 0..=6")]
    StatOutOfRange {
        unit: String,
        stat: &'static str,
        value: u8,
    },

    #[error("{0}: cost must be positive")]
    ZeroCost(String),

    #[error("{0}: health must be positive")]
    ZeroHealth(String),

    #[error("{unit}: bonus targets unknown unit type '{target}'")]
    UnknownBonusTarget { unit: String, target: String },
}

fn default_bonus_amount() -> u8 {
    1
}

/// A composition bonus: each unit of the granting type raises the attack of
/// one otherwise unboosted unit of `target` by `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub target: String,
    #[serde(default = "default_bonus_amount")]
    pub amount: u8,
}

/// Stats for one unit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: u8,
    pub defense: u8,
    pub cost: u32,
    pub health: u8,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

/// Unit type name to stats.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatTable {
    units: BTreeMap<String, UnitStats>,
}

impl StatTable {
    /// Builds a table from already-parsed entries, validating every entry.
    pub fn new(units: BTreeMap<String, UnitStats>) -> Result<Self, StatError> {
        for (name, stats) in &units {
            for (stat, value) in [("attack", stats.attack), ("defense", stats.defense)] {
                if value > DIE_FACES {
                    return Err(StatError::StatOutOfRange {
                        unit: name.clone(),
                        stat,
                        value,
                    });
                }
            }
            if stats.cost == 0 {
                return Err(StatError::ZeroCost(name.clone()));
            }
            if stats.health == 0 {
                return Err(StatError::ZeroHealth(name.clone()));
            }
            if let Some(bonus) = stats.bonuses.iter().find(|b| !units.contains_key(&b.target)) {
                return Err(StatError::UnknownBonusTarget {
                    unit: name.clone(),
                    target: bonus.target.clone(),
                });
            }
        }
        Ok(StatTable { units })
    }

    /// Parses a stat table from a JSON object of name to stats.
    pub fn from_json(json: &str) -> Result<Self, StatError> {
        let units: BTreeMap<String, UnitStats> = serde_json::from_str(json)?;
        Self::new(units)
    }

    /// Reads and parses a stat table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StatError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in roster embedded in the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_UNITS).expect("built-in stat table is valid")
    }

    /// Looks up a unit type by name.
    pub fn get(&self, name: &str) -> Result<&UnitStats, BattleError> {
        self.units
            .get(name)
            .ok_or_else(|| BattleError::UnknownUnit(name.to_string()))
    }

    /// Creates a full-health unit of the named type.
    pub fn spawn(&self, name: &str) -> Result<Unit, BattleError> {
        let stats = self.get(name)?;
        Ok(Unit::new(
            name,
            stats.attack,
            stats.defense,
            stats.cost,
            stats.health,
        ))
    }

    /// Bonuses granted by the named type; empty for unknown types.
    pub fn bonuses(&self, name: &str) -> &[Bonus] {
        self.units
            .get(name)
            .map(|s| s.bonuses.as_slice())
            .unwrap_or(&[])
    }

    /// Unit type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Iterates over `(name, stats)` in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitStats)> {
        self.units.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Cost of the cheapest unit type, or `None` for an empty table.
    pub fn cheapest_cost(&self) -> Option<u32> {
        self.units.values().map(|s| s.cost).min()
    }
}
