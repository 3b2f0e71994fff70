//! Orbitals and the configurations built from them.
//!
//! A [`Configuration`] is the ordered list of orbitals for one molecule instance.
//! Cloning a configuration is a deep copy; history snapshots rely on that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Electrons a single orbital can hold (Pauli exclusion).
pub const ORBITAL_CAPACITY: u8 = 2;

/// Sign of an orbital's contribution to bond order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterType {
    Bonding,
    Antibonding,
    Nonbonding,
}

/// Which atomic shell an orbital derives from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shell {
    #[serde(rename = "1s")]
    S1,
    #[serde(rename = "2s")]
    S2,
    #[serde(rename = "2p")]
    P2,
}

/// Attempted to put more electrons in an orbital than it can hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("orbital {orbital_id} holds at most {capacity} electrons, got {requested}")]
pub struct PauliError {
    pub orbital_id: String,
    pub capacity: u8,
    pub requested: u8,
}

/// A single molecular orbital slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Orbital {
    pub id: &'static str,
    pub label: &'static str,
    /// Fill rank. Orbitals sharing a rank are degenerate.
    pub energy_level: u8,
    pub character: CharacterType,
    pub shell: Shell,
    capacity: u8,
    electrons: u8,
}

impl Orbital {
    pub fn new(
        id: &'static str,
        label: &'static str,
        energy_level: u8,
        character: CharacterType,
        shell: Shell,
    ) -> Self {
        Self {
            id,
            label,
            energy_level,
            character,
            shell,
            capacity: ORBITAL_CAPACITY,
            electrons: 0,
        }
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn electrons(&self) -> u8 {
        self.electrons
    }

    pub fn is_full(&self) -> bool {
        self.electrons >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.electrons == 0
    }

    /// Set the electron count, rejecting anything above capacity.
    pub fn set_electrons(&mut self, count: u8) -> Result<(), PauliError> {
        if count > self.capacity {
            return Err(PauliError {
                orbital_id: self.id.to_string(),
                capacity: self.capacity,
                requested: count,
            });
        }
        self.electrons = count;
        Ok(())
    }
}

/// Orbitals sharing one energy level, borrowed from a configuration.
#[derive(Debug, Clone)]
pub struct EnergyGroup<'a> {
    pub energy_level: u8,
    pub orbitals: Vec<&'a Orbital>,
}

impl EnergyGroup<'_> {
    pub fn electrons(&self) -> u32 {
        self.orbitals.iter().map(|o| o.electrons() as u32).sum()
    }

    pub fn capacity(&self) -> u32 {
        self.orbitals.iter().map(|o| o.capacity() as u32).sum()
    }

    pub fn is_full(&self) -> bool {
        self.electrons() >= self.capacity()
    }
}

/// Ordered orbitals for one molecule instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    orbitals: Vec<Orbital>,
}

impl Configuration {
    pub fn new(orbitals: Vec<Orbital>) -> Self {
        Self { orbitals }
    }

    /// Copy of `self` with the listed orbitals set to the given counts.
    /// Unknown ids are ignored.
    pub fn with_occupancy(&self, occupancy: &[(&str, u8)]) -> Result<Self, PauliError> {
        let mut next = self.emptied();
        for &(id, count) in occupancy {
            if let Some(orbital) = next.get_mut(id) {
                orbital.set_electrons(count)?;
            }
        }
        Ok(next)
    }

    /// Copy of `self` with every orbital empty.
    pub fn emptied(&self) -> Self {
        let mut next = self.clone();
        for orbital in &mut next.orbitals {
            orbital.electrons = 0;
        }
        next
    }

    pub fn get(&self, id: &str) -> Option<&Orbital> {
        self.orbitals.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Orbital> {
        self.orbitals.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Orbital> {
        self.orbitals.iter()
    }

    pub fn len(&self) -> usize {
        self.orbitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbitals.is_empty()
    }

    pub fn electrons_placed(&self) -> u32 {
        self.orbitals.iter().map(|o| o.electrons() as u32).sum()
    }

    pub fn capacity(&self) -> u32 {
        self.orbitals.iter().map(|o| o.capacity() as u32).sum()
    }

    /// Orbitals grouped by energy level, lowest first. Within a group the
    /// configuration order is kept.
    pub fn energy_groups(&self) -> Vec<EnergyGroup<'_>> {
        let mut groups: BTreeMap<u8, Vec<&Orbital>> = BTreeMap::new();
        for orbital in &self.orbitals {
            groups.entry(orbital.energy_level).or_default().push(orbital);
        }
        groups
            .into_iter()
            .map(|(energy_level, orbitals)| EnergyGroup { energy_level, orbitals })
            .collect()
    }
}
