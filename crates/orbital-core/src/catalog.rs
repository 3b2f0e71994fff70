//! Molecule catalog.
//!
//! Species data is embedded as JSON and parsed once at load. The table is
//! read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template;

/// Embed the molecule table at compile time.
const MOLECULES_JSON: &str = include_str!("../data/molecules.json");

/// Which fixed 2p energy sequence a species uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingClass {
    /// σ2p below π2p (O₂, F₂ and heavier).
    Standard,
    /// π2p below σ2p from s-p mixing (B₂, C₂, N₂).
    Mixing,
}

/// A diatomic species the student can fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Molecule {
    pub id: String,
    pub formula: String,
    pub name: String,
    pub total_electrons: u32,
    pub ordering: OrderingClass,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse molecule table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("molecule table is empty")]
    Empty,

    #[error("duplicate molecule id {0:?}")]
    DuplicateId(String),

    #[error("{id} needs {total_electrons} electrons but its orbitals hold only {capacity}")]
    OverCapacity {
        id: String,
        total_electrons: u32,
        capacity: u32,
    },
}

/// Lookup table of molecules, in declaration order.
#[derive(Debug, Clone)]
pub struct MoleculeCatalog {
    molecules: Vec<Molecule>,
}

impl MoleculeCatalog {
    /// Load the built-in table.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(MOLECULES_JSON)
    }

    /// Parse a caller-supplied table. Rejects tables that could never be filled.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let molecules: Vec<Molecule> = serde_json::from_str(json)?;
        Self::from_molecules(molecules)
    }

    pub fn from_molecules(molecules: Vec<Molecule>) -> Result<Self, CatalogError> {
        if molecules.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for molecule in &molecules {
            if !seen.insert(molecule.id.as_str()) {
                return Err(CatalogError::DuplicateId(molecule.id.clone()));
            }
            let capacity = template::generate(molecule.ordering).capacity();
            if molecule.total_electrons > capacity {
                return Err(CatalogError::OverCapacity {
                    id: molecule.id.clone(),
                    total_electrons: molecule.total_electrons,
                    capacity,
                });
            }
        }

        log::debug!("molecule catalog: {} species", molecules.len());
        Ok(Self { molecules })
    }

    pub fn get(&self, id: &str) -> Option<&Molecule> {
        self.molecules.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Molecule> {
        self.molecules.iter()
    }

    /// First entry; the default selection.
    pub fn first(&self) -> &Molecule {
        // Construction guarantees at least one entry.
        &self.molecules[0]
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }
}
