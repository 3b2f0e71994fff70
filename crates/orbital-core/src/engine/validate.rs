//! Checking a student's filling.
//!
//! Two strategies: a rule scan (count, Aufbau, Hund's) and exact comparison
//! against the computed ground state. Both report a wrong electron count first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Molecule;
use crate::engine::filling::ground_state;
use crate::engine::stats::DerivedStats;
use crate::orbital::Configuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStrategy {
    #[default]
    RuleBased,
    ExactMatch,
}

/// First problem found in a configuration. `Display` is the student-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Incorrect electron count. {formula} needs {expected}e⁻, you placed {placed}.")]
    ElectronCount {
        formula: String,
        expected: u32,
        placed: u32,
    },

    #[error("Aufbau Principle violated: Lower energy levels must be completely filled first.")]
    Aufbau { energy_level: u8 },

    #[error("Hund's Rule violated: Degenerate orbitals must be occupied singly before pairing.")]
    Hund { energy_level: u8 },

    #[error("Not the ground state: {label} should hold {expected}e⁻, it holds {placed}.")]
    GroundStateMismatch {
        orbital_id: &'static str,
        label: &'static str,
        expected: u8,
        placed: u8,
    },
}

/// A configuration that passed the check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accepted {
    pub formula: String,
    pub bond_order: f64,
}

impl Accepted {
    pub fn message(&self) -> String {
        format!(
            "Correct! You've successfully configured the ground state for {}.",
            self.formula
        )
    }
}

pub fn check(
    strategy: CheckStrategy,
    config: &Configuration,
    molecule: &Molecule,
) -> Result<Accepted, RuleViolation> {
    match strategy {
        CheckStrategy::RuleBased => validate_rules(config, molecule),
        CheckStrategy::ExactMatch => validate_exact(config, molecule),
    }
}

/// Scan for count, then Aufbau, then Hund's violations.
pub fn validate_rules(config: &Configuration, molecule: &Molecule) -> Result<Accepted, RuleViolation> {
    check_count(config, molecule)?;

    let mut lower_levels_full = true;
    for group in config.energy_groups() {
        let electrons = group.electrons();

        if electrons > 0 && !lower_levels_full {
            return Err(RuleViolation::Aufbau {
                energy_level: group.energy_level,
            });
        }

        let has_pair = group.orbitals.iter().any(|o| o.electrons() == 2);
        let has_empty = group.orbitals.iter().any(|o| o.is_empty());
        if has_pair && has_empty {
            return Err(RuleViolation::Hund {
                energy_level: group.energy_level,
            });
        }

        lower_levels_full &= group.is_full();
    }

    Ok(accepted(config, molecule))
}

/// Count check, then orbital-by-orbital comparison with the ground state.
pub fn validate_exact(config: &Configuration, molecule: &Molecule) -> Result<Accepted, RuleViolation> {
    check_count(config, molecule)?;

    let expected = ground_state(config, molecule.total_electrons);
    for (placed, wanted) in config.iter().zip(expected.iter()) {
        if placed.electrons() != wanted.electrons() {
            return Err(RuleViolation::GroundStateMismatch {
                orbital_id: placed.id,
                label: placed.label,
                expected: wanted.electrons(),
                placed: placed.electrons(),
            });
        }
    }

    Ok(accepted(config, molecule))
}

fn check_count(config: &Configuration, molecule: &Molecule) -> Result<(), RuleViolation> {
    let placed = config.electrons_placed();
    if placed != molecule.total_electrons {
        return Err(RuleViolation::ElectronCount {
            formula: molecule.formula.clone(),
            expected: molecule.total_electrons,
            placed,
        });
    }
    Ok(())
}

fn accepted(config: &Configuration, molecule: &Molecule) -> Accepted {
    Accepted {
        formula: molecule.formula.clone(),
        bond_order: DerivedStats::compute(config).bond_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoleculeCatalog;
    use crate::engine::filling::ground_state_for;
    use crate::template;

    fn molecule(id: &str) -> Molecule {
        MoleculeCatalog::load().unwrap().get(id).unwrap().clone()
    }

    fn both(config: &Configuration, molecule: &Molecule) -> [Result<Accepted, RuleViolation>; 2] {
        [
            check(CheckStrategy::RuleBased, config, molecule),
            check(CheckStrategy::ExactMatch, config, molecule),
        ]
    }

    #[test]
    fn ground_states_pass_both_strategies() {
        for id in ["O2", "O2+", "O2-", "N2", "N2+", "N2-", "C2", "B2", "He2"] {
            let m = molecule(id);
            for result in both(&ground_state_for(&m), &m) {
                let accepted = result.unwrap();
                assert_eq!(accepted.formula, m.formula);
            }
        }
    }

    #[test]
    fn count_reported_before_aufbau() {
        let he2 = molecule("He2");
        // 3 electrons, σ*1s filled over an empty σ1s
        let config = template::generate(he2.ordering)
            .with_occupancy(&[("s1*", 2), ("s2", 1)])
            .unwrap();
        for result in both(&config, &he2) {
            assert_eq!(
                result.unwrap_err(),
                RuleViolation::ElectronCount {
                    formula: "He₂".into(),
                    expected: 4,
                    placed: 3,
                }
            );
        }
    }

    #[test]
    fn aufbau_flags_skipped_level() {
        let he2 = molecule("He2");
        let config = template::generate(he2.ordering)
            .with_occupancy(&[("s1", 2), ("s2", 2)])
            .unwrap();
        assert_eq!(
            validate_rules(&config, &he2).unwrap_err(),
            RuleViolation::Aufbau { energy_level: 2 }
        );
        assert!(matches!(
            validate_exact(&config, &he2).unwrap_err(),
            RuleViolation::GroundStateMismatch { orbital_id: "s1*", expected: 2, placed: 0, .. }
        ));
    }

    #[test]
    fn hund_flags_early_pairing() {
        let b2 = molecule("B2");
        let config = template::generate(b2.ordering)
            .with_occupancy(&[("s1", 2), ("s1*", 2), ("s2", 2), ("s2*", 2), ("pi2p_a", 2)])
            .unwrap();
        assert_eq!(
            validate_rules(&config, &b2).unwrap_err(),
            RuleViolation::Hund { energy_level: 4 }
        );
        assert!(validate_exact(&config, &b2).is_err());
    }

    #[test]
    fn strategies_report_different_violations() {
        // N2+ ground state: π pair (2, 2), σ2p singly occupied.
        let n2_plus = molecule("N2+");
        let config = ground_state_for(&n2_plus);
        assert!(validate_rules(&config, &n2_plus).is_ok());

        // Same total with σ2p and π*2p occupied before the π pair is
        // complete: rule scan reports Aufbau at σ2p, exact match points at
        // the first differing orbital.
        let shuffled = config
            .with_occupancy(&[
                ("s1", 2), ("s1*", 2), ("s2", 2), ("s2*", 2),
                ("pi2p_a", 2), ("pi2p_b", 1), ("s2p", 1),
                ("pi2p*_a", 1),
            ])
            .unwrap();
        assert_eq!(shuffled.electrons_placed(), 13);
        assert_eq!(
            validate_rules(&shuffled, &n2_plus).unwrap_err(),
            RuleViolation::Aufbau { energy_level: 5 }
        );
        assert!(matches!(
            validate_exact(&shuffled, &n2_plus).unwrap_err(),
            RuleViolation::GroundStateMismatch { orbital_id: "pi2p_b", expected: 2, placed: 1, .. }
        ));
    }

    #[test]
    fn exact_match_is_stricter_about_degenerate_choice() {
        // O2+: the lone π* electron may sit in either degenerate orbital.
        let o2_plus = molecule("O2+");
        let key = ground_state_for(&o2_plus);
        assert_eq!(key.get("pi2p*_a").unwrap().electrons(), 1);

        let mirrored = key
            .with_occupancy(&[
                ("s1", 2), ("s1*", 2), ("s2", 2), ("s2*", 2),
                ("s2p", 2), ("pi2p_a", 2), ("pi2p_b", 2),
                ("pi2p*_b", 1),
            ])
            .unwrap();
        let accepted = validate_rules(&mirrored, &o2_plus).unwrap();
        assert_eq!(accepted.bond_order, 2.5);
        assert!(matches!(
            validate_exact(&mirrored, &o2_plus).unwrap_err(),
            RuleViolation::GroundStateMismatch { orbital_id: "pi2p*_a", .. }
        ));
    }

    #[test]
    fn messages_name_the_rule() {
        assert!(RuleViolation::Aufbau { energy_level: 1 }.to_string().starts_with("Aufbau"));
        assert!(RuleViolation::Hund { energy_level: 1 }.to_string().starts_with("Hund's"));
    }
}
