//! Hint capability.
//!
//! Hints come from an injected [`HintProvider`], usually a text-generation
//! service. Any failure, timeout or empty answer settles to a fixed fallback
//! sentence for the request kind. Hints never touch the configuration.

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc;
#[cfg(not(target_arch = "wasm32"))]
use std::thread;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Molecule;
use crate::engine::compare::SpeciesSummary;
use crate::engine::stats::{DerivedStats, StabilityTier};
use crate::orbital::Configuration;

pub const CONFIGURATION_FALLBACK: &str = "Ensure you are filling orbitals from bottom to top (Aufbau) \
and placing one electron in each degenerate orbital before pairing (Hund's Rule).";

pub const COMPARISON_FALLBACK: &str = "Think about Bond Order = (Bonding - Antibonding) / 2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    Configuration,
    Comparison,
}

impl HintKind {
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Configuration => CONFIGURATION_FALLBACK,
            Self::Comparison => COMPARISON_FALLBACK,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbitalOccupancy {
    pub id: &'static str,
    pub label: &'static str,
    pub energy_level: u8,
    pub electrons: u8,
}

/// Everything a provider may look at.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HintContext {
    Configuration {
        molecule: Molecule,
        orbitals: Vec<OrbitalOccupancy>,
        electrons_placed: u32,
        bond_order: f64,
        unpaired_electrons: u32,
        stability: StabilityTier,
    },
    Comparison {
        species: Vec<SpeciesSummary>,
    },
}

impl HintContext {
    pub fn configuration(molecule: &Molecule, config: &Configuration) -> Self {
        let stats = DerivedStats::compute(config);
        Self::Configuration {
            molecule: molecule.clone(),
            orbitals: config
                .iter()
                .map(|o| OrbitalOccupancy {
                    id: o.id,
                    label: o.label,
                    energy_level: o.energy_level,
                    electrons: o.electrons(),
                })
                .collect(),
            electrons_placed: stats.electrons_placed,
            bond_order: stats.bond_order,
            unpaired_electrons: stats.unpaired_electrons,
            stability: stats.stability,
        }
    }

    pub fn comparison(species: Vec<SpeciesSummary>) -> Self {
        Self::Comparison { species }
    }

    pub fn kind(&self) -> HintKind {
        match self {
            Self::Configuration { .. } => HintKind::Configuration,
            Self::Comparison { .. } => HintKind::Comparison,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HintRequest {
    /// Increases per request within a session.
    pub id: u64,
    pub context: HintContext,
    #[serde(rename = "timeout_ms", serialize_with = "as_millis")]
    pub timeout: Duration,
}

fn as_millis<S: serde::Serializer>(timeout: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(timeout.as_millis() as u64)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("hint service unavailable: {0}")]
    Unavailable(String),

    #[error("hint service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("hint service returned an empty answer")]
    Empty,
}

/// Produces hint text for a request. Implementations should give up after
/// `request.timeout`; callers going through [`produce_within`] stop waiting
/// then regardless.
///
/// Providers are shared with worker threads, so requests may overlap. Keep
/// any per-provider state behind interior mutability.
pub trait HintProvider: Send + Sync {
    fn produce_hint(&self, request: &HintRequest) -> Result<String, HintError>;
}

/// Provider for offline sessions; every request settles to the fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineHints;

impl HintProvider for OfflineHints {
    fn produce_hint(&self, _request: &HintRequest) -> Result<String, HintError> {
        Err(HintError::Unavailable("offline".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintOutcome {
    pub text: String,
    pub used_fallback: bool,
}

/// Turn a provider response into text, substituting the fallback on failure.
pub fn settle(kind: HintKind, response: Result<String, HintError>) -> HintOutcome {
    let response = response.and_then(|text| {
        let text = text.trim();
        if text.is_empty() {
            Err(HintError::Empty)
        } else {
            Ok(text.to_string())
        }
    });

    match response {
        Ok(text) => HintOutcome { text, used_fallback: false },
        Err(err) => {
            log::warn!("{:?} hint failed: {}", kind, err);
            HintOutcome {
                text: kind.fallback().to_string(),
                used_fallback: true,
            }
        }
    }
}

/// Ask `provider` and settle the answer.
pub fn request(provider: &dyn HintProvider, request: &HintRequest) -> HintOutcome {
    settle(request.context.kind(), provider.produce_hint(request))
}

/// Ask `provider`, waiting at most `request.timeout`.
///
/// On native targets each request runs on its own worker thread, so a slow
/// answer never holds up the next request. A late answer is discarded. On
/// `wasm32` the call is made inline and the browser enforces `timeout_ms`.
pub fn produce_within<P>(provider: &Arc<P>, request: &HintRequest) -> Result<String, HintError>
where
    P: HintProvider + ?Sized + 'static,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        let (tx, rx) = mpsc::channel();
        let provider = Arc::clone(provider);
        let owned = request.clone();

        thread::spawn(move || {
            // Receiver may have timed out already.
            let _ = tx.send(provider.produce_hint(&owned));
        });

        match rx.recv_timeout(request.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(HintError::Timeout(request.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(HintError::Unavailable("provider thread ended".into()))
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        provider.produce_hint(request)
    }
}

/// Wraps a provider so every call goes through [`produce_within`].
pub struct Bounded<P: ?Sized> {
    inner: Arc<P>,
}

impl<P: HintProvider> Bounded<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<P: HintProvider + ?Sized + 'static> Bounded<P> {
    pub fn shared(inner: Arc<P>) -> Self {
        Self { inner }
    }
}

impl<P: HintProvider + ?Sized + 'static> HintProvider for Bounded<P> {
    fn produce_hint(&self, request: &HintRequest) -> Result<String, HintError> {
        produce_within(&self.inner, request)
    }
}
