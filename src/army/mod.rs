//! Units, stat tables, and the forces built from them.
//!
//! Contains the static unit statistics, the requested army compositions,
//! and the ordered forces that fight a battle.

pub mod force;
pub mod request;
pub mod stats;
pub mod unit;

pub use force::Force;
pub use request::Army;
pub use stats::{Bonus, StatError, StatTable, UnitStats};
pub use unit::{Side, Unit, DIE_FACES};
