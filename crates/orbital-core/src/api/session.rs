use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::{Cue, StatEvent};
use crate::catalog::{CatalogError, Molecule, MoleculeCatalog};
use crate::engine::compare::SpeciesSummary;
use crate::engine::stats::DerivedStats;
use crate::engine::validate::{CheckStrategy, RuleViolation};
use crate::hint::{self, HintContext, HintKind, HintOutcome, HintProvider, HintRequest, OfflineHints};
use crate::input::queue::{Command, CommandQueue};
use crate::orbital::Configuration;
use crate::placement::{Feedback, PlacementMachine, Toggle};

/// Session settings, provided by the embedding app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How "Check" judges a configuration (default: rule scan).
    pub check_strategy: CheckStrategy,
    /// Upper bound on a hint request, in milliseconds (default: 8000).
    pub hint_timeout_ms: u64,
    /// Molecule selected at start. Default: first catalog entry.
    pub initial_molecule: Option<String>,
    /// Maximum cues per tick (default: 32).
    pub max_cues: usize,
    /// Maximum stat events per tick (default: 32).
    pub max_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_strategy: CheckStrategy::RuleBased,
            hint_timeout_ms: 8000,
            initial_molecule: None,
            max_cues: 32,
            max_events: 32,
        }
    }
}

impl SessionConfig {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn hint_timeout(&self) -> Duration {
        Duration::from_millis(self.hint_timeout_ms)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("unknown molecule {0:?}")]
    UnknownMolecule(String),
}

/// One student's session: catalog, placement state and per-tick output.
/// Upper bound on per-tick buffer preallocation; `max_cues` and `max_events`
/// come from app JSON and are only enforced at push time.
const FRAME_PREALLOC: usize = 256;

pub struct Session {
    config: SessionConfig,
    catalog: MoleculeCatalog,
    machine: PlacementMachine,
    hints: Arc<dyn HintProvider>,
    next_hint_id: u64,
    pending_hint: Option<(u64, HintKind)>,
    cues: Vec<Cue>,
    events: Vec<StatEvent>,
}

impl Session {
    pub fn new(
        catalog: MoleculeCatalog,
        config: SessionConfig,
        hints: Box<dyn HintProvider>,
    ) -> Result<Self, SessionError> {
        let molecule = match &config.initial_molecule {
            Some(id) => catalog
                .get(id)
                .ok_or_else(|| SessionError::UnknownMolecule(id.clone()))?,
            None => catalog.first(),
        }
        .clone();

        Ok(Self {
            machine: PlacementMachine::new(molecule),
            cues: Vec::with_capacity(config.max_cues.min(FRAME_PREALLOC)),
            events: Vec::with_capacity(config.max_events.min(FRAME_PREALLOC)),
            config,
            catalog,
            hints: Arc::from(hints),
            next_hint_id: 1,
            pending_hint: None,
        })
    }

    /// Built-in catalog, default settings, no hint service.
    pub fn offline() -> Result<Self, SessionError> {
        Self::new(
            MoleculeCatalog::load()?,
            SessionConfig::default(),
            Box::new(OfflineHints),
        )
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MoleculeCatalog {
        &self.catalog
    }

    pub fn molecule(&self) -> &Molecule {
        self.machine.molecule()
    }

    pub fn configuration(&self) -> &Configuration {
        self.machine.configuration()
    }

    pub fn stats(&self) -> DerivedStats {
        DerivedStats::compute(self.machine.configuration())
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.machine.feedback()
    }

    pub fn history_len(&self) -> usize {
        self.machine.history_len()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn events(&self) -> &[StatEvent] {
        &self.events
    }

    /// Clear per-tick output (cues, events).
    pub fn clear_frame_data(&mut self) {
        self.cues.clear();
        self.events.clear();
    }

    /// Apply all queued commands in order.
    pub fn update(&mut self, queue: &CommandQueue) {
        for command in queue.iter() {
            self.apply(command.clone());
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SelectMolecule(id) => {
                if let Err(err) = self.select_molecule(&id) {
                    log::warn!("select: {}", err);
                }
            }
            Command::Toggle(id) => {
                self.toggle(&id);
            }
            Command::Undo => {
                self.undo();
            }
            Command::AutoFill => self.auto_fill(),
            Command::Check => {
                // Reported through feedback, the cue and the CHECKED event.
                self.check().ok();
            }
            Command::RequestHint => {
                self.request_hint();
            }
            Command::RequestComparisonHint(ids) => {
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                self.request_comparison_hint(&ids);
            }
        }
    }

    /// Switch to a catalog molecule. Selecting the current one resets it.
    pub fn select_molecule(&mut self, id: &str) -> Result<(), SessionError> {
        let molecule = self
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownMolecule(id.to_string()))?
            .clone();
        self.machine.switch_molecule(molecule);
        self.pending_hint = None;
        self.emit_cue(Cue::SWITCH);
        self.emit_stats();
        Ok(())
    }

    pub fn toggle(&mut self, orbital_id: &str) -> Toggle {
        let outcome = self.machine.toggle(orbital_id);
        match outcome {
            Toggle::Added => self.emit_cue(Cue::ORBITAL_ADD),
            Toggle::Emptied | Toggle::Recycled => self.emit_cue(Cue::ORBITAL_REMOVE),
            Toggle::Rejected => self.emit_cue(Cue::ERROR),
            Toggle::Ignored => {}
        }
        if outcome.changed_state() {
            self.emit_stats();
        }
        outcome
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.machine.undo();
        if undone {
            self.emit_cue(Cue::UNDO);
            self.emit_stats();
        }
        undone
    }

    pub fn auto_fill(&mut self) {
        self.machine.auto_fill();
        self.emit_cue(Cue::SUCCESS);
        self.emit_stats();
    }

    pub fn check(&mut self) -> Result<(), RuleViolation> {
        let result = self.machine.check(self.config.check_strategy);
        match &result {
            Ok(()) => {
                log::info!("check passed for {}", self.machine.molecule().id);
                self.emit_cue(Cue::SUCCESS);
            }
            Err(violation) => {
                log::info!("check failed for {}: {:?}", self.machine.molecule().id, violation);
                self.emit_cue(Cue::ERROR);
            }
        }
        self.emit_event(StatEvent {
            kind: StatEvent::CHECKED,
            a: if result.is_ok() { 1.0 } else { 0.0 },
            ..StatEvent::default()
        });
        result
    }

    /// Hint about the current configuration, through the session's provider.
    pub fn request_hint(&mut self) -> HintOutcome {
        let context = HintContext::configuration(self.machine.molecule(), self.machine.configuration());
        self.run_hint(context)
    }

    /// Hint comparing catalog species. Unknown ids are skipped.
    pub fn request_comparison_hint(&mut self, ids: &[&str]) -> HintOutcome {
        let context = self.comparison_context(ids);
        self.run_hint(context)
    }

    pub fn comparison_context(&self, ids: &[&str]) -> HintContext {
        let species = ids
            .iter()
            .filter_map(|id| {
                let molecule = self.catalog.get(id);
                if molecule.is_none() {
                    log::warn!("comparison hint: unknown molecule {:?}", id);
                }
                molecule
            })
            .map(SpeciesSummary::of)
            .collect();
        HintContext::comparison(species)
    }

    /// Start a hint request for an external, possibly asynchronous caller.
    /// The request supersedes any earlier pending one.
    pub fn begin_hint(&mut self, context: HintContext) -> HintRequest {
        let id = self.next_hint_id;
        self.next_hint_id += 1;
        self.pending_hint = Some((id, context.kind()));
        HintRequest {
            id,
            context,
            timeout: self.config.hint_timeout(),
        }
    }

    /// Deliver the response to a request from [`Session::begin_hint`].
    /// Returns `None` when the request is no longer current.
    pub fn finish_hint(
        &mut self,
        request_id: u64,
        response: Result<String, hint::HintError>,
    ) -> Option<HintOutcome> {
        let kind = match self.pending_hint {
            Some((id, kind)) if id == request_id => kind,
            _ => {
                log::warn!("dropping stale hint response {}", request_id);
                return None;
            }
        };
        self.pending_hint = None;

        let outcome = hint::settle(kind, response);
        self.machine.set_feedback(Feedback::info(outcome.text.clone()));
        self.emit_event(StatEvent {
            kind: StatEvent::HINT,
            a: request_id as f32,
            b: if outcome.used_fallback { 1.0 } else { 0.0 },
            ..StatEvent::default()
        });
        Some(outcome)
    }

    pub fn has_pending_hint(&self) -> bool {
        self.pending_hint.is_some()
    }

    fn run_hint(&mut self, context: HintContext) -> HintOutcome {
        let kind = context.kind();
        let request = self.begin_hint(context);
        let response = hint::produce_within(&self.hints, &request);
        // The request was just registered, so it is current.
        self.finish_hint(request.id, response)
            .unwrap_or_else(|| hint::settle(kind, Err(hint::HintError::Empty)))
    }

    fn emit_stats(&mut self) {
        let stats = self.stats();
        self.emit_event(StatEvent {
            kind: StatEvent::PROGRESS,
            a: stats.electrons_placed as f32,
            b: self.machine.molecule().total_electrons as f32,
            c: stats.bond_order as f32,
        });
        self.emit_event(StatEvent {
            kind: StatEvent::MAGNETISM,
            a: stats.unpaired_electrons as f32,
            b: if stats.is_paramagnetic { 1.0 } else { 0.0 },
            c: stats.stability.index() as f32,
        });
    }

    fn emit_cue(&mut self, cue: Cue) {
        if self.cues.len() < self.config.max_cues {
            self.cues.push(cue);
        }
    }

    fn emit_event(&mut self, event: StatEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }
}
