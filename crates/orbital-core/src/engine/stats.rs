//! Quantities derived from a configuration: bond order, magnetism, stability.

use serde::Serialize;

use crate::orbital::{CharacterType, Configuration};

/// Qualitative stability bucket derived from bond order alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityTier {
    Nonexistent,
    HighlyUnstable,
    Weak,
    Stable,
    HighlyStable,
}

impl StabilityTier {
    /// Boundary values fall into the lower tier.
    pub fn from_bond_order(bond_order: f64) -> Self {
        if bond_order <= 0.0 {
            Self::Nonexistent
        } else if bond_order <= 0.5 {
            Self::HighlyUnstable
        } else if bond_order <= 1.5 {
            Self::Weak
        } else if bond_order < 2.5 {
            Self::Stable
        } else {
            Self::HighlyStable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Nonexistent => "nonexistent/unstable",
            Self::HighlyUnstable => "highly unstable",
            Self::Weak => "weak",
            Self::Stable => "stable",
            Self::HighlyStable => "highly stable",
        }
    }

    /// Position in the ordering above; used on the wire.
    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedStats {
    pub electrons_placed: u32,
    pub bonding_electrons: u32,
    pub antibonding_electrons: u32,
    /// Halves are kept as-is.
    pub bond_order: f64,
    pub unpaired_electrons: u32,
    pub is_paramagnetic: bool,
    pub stability: StabilityTier,
}

impl DerivedStats {
    pub fn compute(config: &Configuration) -> Self {
        let by_character = |character: CharacterType| -> u32 {
            config
                .iter()
                .filter(|o| o.character == character)
                .map(|o| o.electrons() as u32)
                .sum()
        };

        let bonding_electrons = by_character(CharacterType::Bonding);
        let antibonding_electrons = by_character(CharacterType::Antibonding);
        let bond_order = ((bonding_electrons as f64 - antibonding_electrons as f64) / 2.0).max(0.0);
        let unpaired_electrons = config.iter().filter(|o| o.electrons() == 1).count() as u32;

        Self {
            electrons_placed: config.electrons_placed(),
            bonding_electrons,
            antibonding_electrons,
            bond_order,
            unpaired_electrons,
            is_paramagnetic: unpaired_electrons > 0,
            stability: StabilityTier::from_bond_order(bond_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OrderingClass;
    use crate::template;

    #[test]
    fn tier_boundaries_belong_to_lower_tier() {
        assert_eq!(StabilityTier::from_bond_order(-1.0), StabilityTier::Nonexistent);
        assert_eq!(StabilityTier::from_bond_order(0.0), StabilityTier::Nonexistent);
        assert_eq!(StabilityTier::from_bond_order(0.5), StabilityTier::HighlyUnstable);
        assert_eq!(StabilityTier::from_bond_order(1.0), StabilityTier::Weak);
        assert_eq!(StabilityTier::from_bond_order(1.5), StabilityTier::Weak);
        assert_eq!(StabilityTier::from_bond_order(2.0), StabilityTier::Stable);
        assert_eq!(StabilityTier::from_bond_order(2.5), StabilityTier::HighlyStable);
        assert_eq!(StabilityTier::from_bond_order(3.0), StabilityTier::HighlyStable);
    }

    #[test]
    fn half_bond_order_preserved() {
        // H2+-like: one bonding electron
        let config = template::generate(OrderingClass::Standard)
            .with_occupancy(&[("s1", 1)])
            .unwrap();
        let stats = DerivedStats::compute(&config);
        assert_eq!(stats.bond_order, 0.5);
        assert_eq!(stats.unpaired_electrons, 1);
        assert!(stats.is_paramagnetic);
        assert_eq!(stats.stability.label(), "highly unstable");
    }

    #[test]
    fn bond_order_clamped_at_zero() {
        let config = template::generate(OrderingClass::Standard)
            .with_occupancy(&[("s1*", 2)])
            .unwrap();
        let stats = DerivedStats::compute(&config);
        assert_eq!(stats.antibonding_electrons, 2);
        assert_eq!(stats.bond_order, 0.0);
        assert_eq!(stats.stability, StabilityTier::Nonexistent);
    }

    #[test]
    fn empty_configuration() {
        let stats = DerivedStats::compute(&template::generate(OrderingClass::Mixing));
        assert_eq!(stats.electrons_placed, 0);
        assert!(!stats.is_paramagnetic);
    }
}
