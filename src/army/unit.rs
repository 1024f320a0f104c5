//! Combat units and battle sides.
//!
//! A unit's stats are success thresholds on a six-sided die: a unit with
//! attack 3 hits on a roll of 1-3 when firing as an attacker.

use std::sync::Arc;

/// Number of faces on the combat die.
pub const DIE_FACES: u8 = 6;

/// Which side of a battle a force is fighting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// Returns the opposing side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// A single combat unit.
///
/// `health` is the only field that changes over a battle; everything else is
/// copied from the stat table when the unit is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    pub name: Arc<str>,
    pub attack: u8,
    pub defense: u8,
    pub cost: u32,
    pub max_health: u8,
    pub health: u8,
}

impl Unit {
    /// Creates a unit at full health.
    pub fn new(name: impl Into<Arc<str>>, attack: u8, defense: u8, cost: u32, health: u8) -> Self {
        Unit {
            name: name.into(),
            attack,
            defense,
            cost,
            max_health: health,
            health,
        }
    }

    /// Returns the stat this unit rolls against when fighting on `side`.
    pub const fn combat_value(&self, side: Side) -> u8 {
        match side {
            Side::Attacker => self.attack,
            Side::Defender => self.defense,
        }
    }

    /// True if the unit can take a hit without being removed.
    pub const fn can_absorb(&self) -> bool {
        self.health > 1
    }

    /// True once the unit has taken at least one hit.
    pub const fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_unit_starts_at_full_health() {
        let bb = Unit::new("Battleship", 4, 4, 20, 2);
        assert_eq!(bb.health, 2);
        assert_eq!(bb.max_health, 2);
        assert!(bb.can_absorb());
        assert!(!bb.is_damaged());
    }

    #[test]
    fn combat_value_follows_side() {
        let inf = Unit::new("Infantry", 1, 2, 3, 1);
        assert_eq!(inf.combat_value(Side::Attacker), 1);
        assert_eq!(inf.combat_value(Side::Defender), 2);
        assert!(!inf.can_absorb());
    }

    #[test]
    fn opponent_flips_side() {
        assert_eq!(Side::Attacker.opponent(), Side::Defender);
        assert_eq!(Side::Defender.opponent(), Side::Attacker);
    }
}
