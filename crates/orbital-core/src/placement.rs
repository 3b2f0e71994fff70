//! Placement state machine: the only place a configuration is mutated.
//!
//! Cycle per click is 0 → 1 → 2 → 0. Once every electron is placed, clicking a
//! half-filled orbital clears it; clicking an empty one is rejected.
//! The remaining budget is always recomputed from the configuration.

use serde::Serialize;

use crate::catalog::Molecule;
use crate::engine::filling::ground_state;
use crate::engine::validate::{check, CheckStrategy, RuleViolation};
use crate::orbital::Configuration;
use crate::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// A notice for the student, replaced by the next state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Info, message: message.into() }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// One electron added.
    Added,
    /// A full orbital was emptied.
    Emptied,
    /// Budget exhausted; a half-filled orbital was cleared.
    Recycled,
    /// Budget exhausted and the orbital was already empty.
    Rejected,
    /// No orbital with that id.
    Ignored,
}

impl Toggle {
    pub fn changed_state(self) -> bool {
        matches!(self, Self::Added | Self::Emptied | Self::Recycled)
    }
}

pub struct PlacementMachine {
    molecule: Molecule,
    config: Configuration,
    history: Vec<Configuration>,
    feedback: Option<Feedback>,
}

impl PlacementMachine {
    pub fn new(molecule: Molecule) -> Self {
        let config = template::generate(molecule.ordering);
        Self {
            molecule,
            config,
            history: Vec::new(),
            feedback: None,
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Electrons still to place.
    pub fn budget(&self) -> u32 {
        self.molecule
            .total_electrons
            .saturating_sub(self.config.electrons_placed())
    }

    pub fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }

    /// Advance one orbital through its cycle.
    pub fn toggle(&mut self, orbital_id: &str) -> Toggle {
        let budget = self.budget();
        let total = self.molecule.total_electrons;
        let Some(orbital) = self.config.get(orbital_id) else {
            log::debug!("toggle: unknown orbital {:?}", orbital_id);
            return Toggle::Ignored;
        };

        let current = orbital.electrons();
        let (next, outcome) = if orbital.is_full() {
            (0, Toggle::Emptied)
        } else if budget > 0 {
            (current + 1, Toggle::Added)
        } else if current > 0 {
            (0, Toggle::Recycled)
        } else {
            self.feedback = Some(Feedback::error(format!(
                "All {} electrons are already placed.",
                total
            )));
            return Toggle::Rejected;
        };

        let snapshot = self.config.clone();
        if let Some(orbital) = self.config.get_mut(orbital_id) {
            if let Err(err) = orbital.set_electrons(next) {
                log::warn!("toggle: {}", err);
                return Toggle::Ignored;
            }
        }
        self.history.push(snapshot);
        self.feedback = match outcome {
            Toggle::Recycled => Some(Feedback::info(format!(
                "All {} electrons are placed; the orbital was cleared.",
                total
            ))),
            _ => None,
        };

        log::debug!("toggle {}: {} -> {} ({:?})", orbital_id, current, next, outcome);
        outcome
    }

    /// Restore the previous configuration. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.config = previous;
                self.feedback = None;
                true
            }
            None => false,
        }
    }

    /// Replace the configuration with the ground state, keeping the old one in history.
    pub fn auto_fill(&mut self) {
        let filled = ground_state(&self.config, self.molecule.total_electrons);
        let previous = std::mem::replace(&mut self.config, filled);
        self.history.push(previous);
        self.feedback = None;
    }

    /// Start over on a fresh template for `molecule`.
    pub fn switch_molecule(&mut self, molecule: Molecule) {
        log::info!("switching to {} ({} e⁻)", molecule.id, molecule.total_electrons);
        self.config = template::generate(molecule.ordering);
        self.molecule = molecule;
        self.history.clear();
        self.feedback = None;
    }

    /// Validate without touching the configuration or history.
    pub fn check(&mut self, strategy: CheckStrategy) -> Result<(), RuleViolation> {
        let result = check(strategy, &self.config, &self.molecule);
        self.feedback = Some(match &result {
            Ok(accepted) => Feedback::success(accepted.message()),
            Err(violation) => Feedback::error(violation.to_string()),
        });
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoleculeCatalog;

    fn machine(id: &str) -> PlacementMachine {
        PlacementMachine::new(MoleculeCatalog::load().unwrap().get(id).unwrap().clone())
    }

    fn electrons(m: &PlacementMachine, id: &str) -> u8 {
        m.configuration().get(id).unwrap().electrons()
    }

    #[test]
    fn cycle_zero_one_two_zero() {
        let mut m = machine("O2");
        assert_eq!(m.toggle("s1"), Toggle::Added);
        assert_eq!(electrons(&m, "s1"), 1);
        assert_eq!(m.toggle("s1"), Toggle::Added);
        assert_eq!(electrons(&m, "s1"), 2);
        assert_eq!(m.toggle("s1"), Toggle::Emptied);
        assert_eq!(electrons(&m, "s1"), 0);
        assert_eq!(m.history_len(), 3);
    }

    #[test]
    fn unknown_orbital_is_noop() {
        let mut m = machine("O2");
        m.toggle("s1");
        let before = m.configuration().clone();
        assert_eq!(m.toggle("d3"), Toggle::Ignored);
        assert_eq!(m.configuration(), &before);
        assert_eq!(m.history_len(), 1);
    }

    #[test]
    fn budget_exhausted_rejects_empty_orbital() {
        let mut m = machine("He2");
        for id in ["s1", "s1", "s1*", "s1*"] {
            m.toggle(id);
        }
        assert_eq!(m.budget(), 0);

        assert_eq!(m.toggle("s2"), Toggle::Rejected);
        assert_eq!(electrons(&m, "s2"), 0);
        assert_eq!(m.history_len(), 4);
        let feedback = m.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert!(feedback.message.contains("All 4 electrons"));
    }

    #[test]
    fn budget_exhausted_clears_half_filled_orbital() {
        let mut m = machine("He2");
        for id in ["s1", "s1", "s1*", "s2"] {
            m.toggle(id);
        }
        assert_eq!(m.budget(), 0);

        assert_eq!(m.toggle("s2"), Toggle::Recycled);
        assert_eq!(electrons(&m, "s2"), 0);
        assert_eq!(m.budget(), 1);
        assert_eq!(m.history_len(), 5);
        assert_eq!(m.feedback().unwrap().kind, FeedbackKind::Info);
    }

    #[test]
    fn full_orbital_empties_without_budget() {
        let mut m = machine("He2");
        for id in ["s1", "s1", "s1*", "s1*"] {
            m.toggle(id);
        }
        assert_eq!(m.toggle("s1*"), Toggle::Emptied);
        assert_eq!(m.budget(), 2);
    }

    #[test]
    fn state_change_clears_stale_feedback() {
        let mut m = machine("He2");
        for id in ["s1", "s1", "s1*", "s1*"] {
            m.toggle(id);
        }
        m.toggle("s2");
        assert!(m.feedback().is_some());
        m.toggle("s1");
        assert!(m.feedback().is_none());
    }

    #[test]
    fn undo_restores_exact_snapshot() {
        let mut m = machine("N2");
        m.toggle("s1");
        m.toggle("pi2p_a");
        let before = m.configuration().clone();
        m.toggle("pi2p_a");
        assert!(m.undo());
        assert_eq!(m.configuration(), &before);
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut m = machine("N2");
        assert!(!m.undo());
        assert_eq!(m.configuration().electrons_placed(), 0);
    }

    #[test]
    fn auto_fill_is_undoable() {
        let mut m = machine("B2");
        m.toggle("s2p*");
        let before = m.configuration().clone();
        m.auto_fill();
        assert_eq!(m.configuration().electrons_placed(), 10);
        assert_eq!(electrons(&m, "s2p*"), 0);
        assert!(m.undo());
        assert_eq!(m.configuration(), &before);
    }

    #[test]
    fn switch_clears_history_and_feedback() {
        let catalog = MoleculeCatalog::load().unwrap();
        let mut m = machine("O2");
        m.toggle("s1");
        m.check(CheckStrategy::RuleBased).unwrap_err();
        m.switch_molecule(catalog.get("N2").unwrap().clone());
        assert_eq!(m.history_len(), 0);
        assert!(m.feedback().is_none());
        assert_eq!(m.configuration().get("pi2p_a").unwrap().energy_level, 4);
        assert_eq!(m.budget(), 14);
    }

    #[test]
    fn check_reports_without_mutating() {
        let mut m = machine("He2");
        m.auto_fill();
        let before = m.configuration().clone();
        assert!(m.check(CheckStrategy::RuleBased).is_ok());
        assert!(m.check(CheckStrategy::ExactMatch).is_ok());
        assert_eq!(m.configuration(), &before);
        assert_eq!(m.history_len(), 1);
        let feedback = m.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Success);
        assert!(feedback.message.contains("He₂"));
    }
}
