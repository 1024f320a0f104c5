//! Transposition table for the battle recursion.
//!
//! Different hit sequences often leave both sides with the same units in the
//! same health, so the recursion tree is really a DAG. States are keyed by
//! each force's ordered `(type, health)` sequence plus the recursion position.
//! Order is part of the key because it breaks casualty ties; forces only ever
//! shrink or take damage in place, so equivalent branches produce the same
//! sequence.

use std::collections::HashMap;
use std::sync::Arc;

use super::outcome::Mass;
use crate::army::{Force, Side};

/// Compact identity of a force for memoization.
pub type ForceKey = Vec<(Arc<str>, u8)>;

pub fn force_key(force: &Force) -> ForceKey {
    force.iter().map(|u| (Arc::clone(&u.name), u.health)).collect()
}

/// A position in the recursion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub attackers: ForceKey,
    pub defenders: ForceKey,
    pub round: u32,
    pub active: Side,
    pub pending: usize,
}

impl StateKey {
    pub fn new(
        attackers: &Force,
        defenders: &Force,
        round: u32,
        active: Side,
        pending: usize,
    ) -> Self {
        StateKey {
            attackers: force_key(attackers),
            defenders: force_key(defenders),
            round,
            active,
            pending,
        }
    }
}

/// Cached mass per visited state.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<StateKey, Mass>,
    hits: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable::default()
    }

    pub fn get(&mut self, key: &StateKey) -> Option<Mass> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    pub fn insert(&mut self, key: StateKey, mass: Mass) {
        self.entries.insert(key, mass);
    }

    /// Number of distinct states stored.
    pub fn states(&self) -> usize {
        self.entries.len()
    }

    /// Number of lookups answered from the table.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::Unit;

    #[test]
    fn key_tracks_health_and_order() {
        let mut bb = Unit::new("Battleship", 4, 4, 20, 2);
        let inf = Unit::new("Infantry", 1, 2, 3, 1);
        let a = Force::new(vec![bb.clone(), inf.clone()]);
        let b = Force::new(vec![inf.clone(), bb.clone()]);
        assert_ne!(force_key(&a), force_key(&b));
        bb.health = 1;
        let c = Force::new(vec![bb, inf]);
        assert_ne!(force_key(&a), force_key(&c));
    }

    #[test]
    fn equal_forces_share_a_key() {
        let a = Force::new(vec![Unit::new("Infantry", 1, 2, 3, 1); 3]);
        let b = Force::new(vec![Unit::new("Infantry", 1, 2, 3, 1); 3]);
        let key_a = StateKey::new(&a, &b, 2, Side::Defender, 1);
        let key_b = StateKey::new(&b, &a, 2, Side::Defender, 1);
        assert_eq!(key_a, key_b);

        let mut table = TranspositionTable::new();
        table.insert(key_a, Mass::UNRESOLVED);
        assert_eq!(table.get(&key_b), Some(Mass::UNRESOLVED));
        assert_eq!(table.hits(), 1);
        assert_eq!(table.states(), 1);
    }
}
