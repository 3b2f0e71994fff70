//! Configuration engine: pure functions over a configuration and its molecule.

pub mod compare;
pub mod filling;
pub mod stats;
pub mod validate;

pub use compare::{rank_by_stability, SpeciesSummary};
pub use filling::{ground_state, ground_state_for};
pub use stats::{DerivedStats, StabilityTier};
pub use validate::{check, validate_exact, validate_rules, Accepted, CheckStrategy, RuleViolation};
