//! Side-by-side ground-state summaries for several species.

use serde::Serialize;

use crate::catalog::Molecule;
use crate::engine::filling::ground_state_for;
use crate::engine::stats::{DerivedStats, StabilityTier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub id: String,
    pub formula: String,
    pub bond_order: f64,
    pub unpaired_electrons: u32,
    pub stability: StabilityTier,
}

impl SpeciesSummary {
    pub fn of(molecule: &Molecule) -> Self {
        let stats = DerivedStats::compute(&ground_state_for(molecule));
        Self {
            id: molecule.id.clone(),
            formula: molecule.formula.clone(),
            bond_order: stats.bond_order,
            unpaired_electrons: stats.unpaired_electrons,
            stability: stats.stability,
        }
    }
}

/// Ground-state summaries, most stable first. Ties keep input order.
pub fn rank_by_stability<'a>(molecules: impl IntoIterator<Item = &'a Molecule>) -> Vec<SpeciesSummary> {
    let mut summaries: Vec<_> = molecules.into_iter().map(SpeciesSummary::of).collect();
    summaries.sort_by(|a, b| b.bond_order.total_cmp(&a.bond_order));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoleculeCatalog;

    #[test]
    fn oxygen_series_ordering() {
        let catalog = MoleculeCatalog::load().unwrap();
        let species = ["O2-", "O2", "O2+"].map(|id| catalog.get(id).unwrap());
        let ranked = rank_by_stability(species);
        let order: Vec<_> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["O2+", "O2", "O2-"]);
        assert_eq!(ranked[0].bond_order, 2.5);
        assert_eq!(ranked[2].bond_order, 1.5);
    }

    #[test]
    fn ties_keep_input_order() {
        let catalog = MoleculeCatalog::load().unwrap();
        // N2+ and N2- both have bond order 2.5
        let species = ["N2-", "N2+"].map(|id| catalog.get(id).unwrap());
        let ranked = rank_by_stability(species);
        assert_eq!(ranked[0].id, "N2-");
        assert_eq!(ranked[0].bond_order, ranked[1].bond_order);
    }
}
