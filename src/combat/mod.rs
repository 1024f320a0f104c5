//! Single-volley combat mechanics.
//!
//! Effective strengths, the hit-count distribution of a volley, and the
//! casualty policy that turns hits into losses.

pub mod casualty;
pub mod hits;
pub mod modifier;

pub use casualty::apply_hits;
pub use hits::HitDistribution;
pub use modifier::StrengthModifier;
