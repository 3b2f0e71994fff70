pub mod api;
pub mod bridge;
pub mod catalog;
pub mod engine;
pub mod hint;
pub mod input;
pub mod orbital;
pub mod placement;
pub mod template;

// Re-export key types at crate root for convenience
pub use api::session::{Session, SessionConfig, SessionError};
pub use api::types::{Cue, StatEvent};
pub use bridge::protocol::StatsLayout;
pub use catalog::{CatalogError, Molecule, MoleculeCatalog, OrderingClass};
pub use engine::{
    check, ground_state, ground_state_for, rank_by_stability, Accepted, CheckStrategy,
    DerivedStats, RuleViolation, SpeciesSummary, StabilityTier,
};
pub use hint::{
    Bounded, HintContext, HintError, HintKind, HintOutcome, HintProvider, HintRequest,
    OfflineHints,
};
pub use input::queue::{Command, CommandQueue};
pub use orbital::{CharacterType, Configuration, EnergyGroup, Orbital, PauliError, Shell, ORBITAL_CAPACITY};
pub use placement::{Feedback, FeedbackKind, PlacementMachine, Toggle};
