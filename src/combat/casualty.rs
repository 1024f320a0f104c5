//! Casualty allocation.
//!
//! Hits are taken in two passes. First every unit that can absorb a hit
//! (health above one) soaks one, in force order, until the hits run out.
//! Remaining hits then remove whole units, weakest first by the losing
//! side's own combat stat, with the earliest unit winning ties.

use crate::army::{Force, Side, Unit};

/// Applies `hits` to a force fighting on `side`, returning the surviving force.
///
/// The input force is not modified. Hits beyond what the force can take are
/// discarded and the result is empty.
pub fn apply_hits(force: &Force, hits: usize, side: Side) -> Force {
    if hits == 0 {
        return force.clone();
    }
    let mut units = force.units().to_vec();
    let mut remaining = hits;

    for unit in units.iter_mut() {
        if remaining == 0 {
            break;
        }
        if unit.can_absorb() {
            unit.health -= 1;
            remaining -= 1;
        }
    }

    while remaining > 0 && !units.is_empty() {
        let worst = weakest_unit(&units, side);
        units.remove(worst);
        remaining -= 1;
    }

    Force::new(units)
}

/// Index of the unit with the lowest combat value for `side`, first on ties.
fn weakest_unit(units: &[Unit], side: Side) -> usize {
    let mut worst = 0;
    for (i, unit) in units.iter().enumerate().skip(1) {
        if unit.combat_value(side) < units[worst].combat_value(side) {
            worst = i;
        }
    }
    worst
}
