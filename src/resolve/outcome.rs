//! Battle results and diagnostic outcome counters.

use std::ops::{Add, AddAssign, Mul};

use serde::Serialize;

/// Counts of terminal leaves reached while exploring a battle.
///
/// Counters are local to one evaluation; parallel branches each keep their
/// own and are merged once every branch has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub attacker_wins: u64,
    pub defender_wins: u64,
    pub unresolved: u64,
    /// Every recursive evaluation, terminal or not.
    pub branches: u64,
}

impl OutcomeCounts {
    /// Terminal leaves of any kind.
    pub fn leaves(&self) -> u64 {
        self.attacker_wins + self.defender_wins + self.unresolved
    }
}

impl AddAssign for OutcomeCounts {
    fn add_assign(&mut self, other: OutcomeCounts) {
        self.attacker_wins += other.attacker_wins;
        self.defender_wins += other.defender_wins;
        self.unresolved += other.unresolved;
        self.branches += other.branches;
    }
}

/// Probability mass carried up the recursion: how much ends in an attacker
/// win, and how much was cut off unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mass {
    pub win: f64,
    pub unresolved: f64,
}

impl Mass {
    pub const ATTACKER_WIN: Mass = Mass {
        win: 1.0,
        unresolved: 0.0,
    };
    pub const DEFENDER_WIN: Mass = Mass {
        win: 0.0,
        unresolved: 0.0,
    };
    pub const UNRESOLVED: Mass = Mass {
        win: 0.0,
        unresolved: 1.0,
    };

    /// Attacker win probability, scoring unresolved mass as a coin flip.
    pub fn attacker_win(&self) -> f64 {
        self.win + 0.5 * self.unresolved
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, other: Mass) -> Mass {
        Mass {
            win: self.win + other.win,
            unresolved: self.unresolved + other.unresolved,
        }
    }
}

impl AddAssign for Mass {
    fn add_assign(&mut self, other: Mass) {
        *self = *self + other;
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, weight: f64) -> Mass {
        Mass {
            win: self.win * weight,
            unresolved: self.unresolved * weight,
        }
    }
}

/// The outcome of evaluating one battle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattleResult {
    pub attacker_win: f64,
    pub defender_win: f64,
    /// Probability of reaching the round cap. Half of it is counted in
    /// `attacker_win`.
    pub unresolved_mass: f64,
    pub outcomes: OutcomeCounts,
}

impl BattleResult {
    pub fn from_mass(mass: Mass, outcomes: OutcomeCounts) -> Self {
        let attacker_win = mass.attacker_win();
        BattleResult {
            attacker_win,
            defender_win: 1.0 - attacker_win,
            unresolved_mass: mass.unresolved,
            outcomes,
        }
    }
}
