//! Ground-state filling (Aufbau + Hund's rule by construction).

use crate::catalog::Molecule;
use crate::orbital::Configuration;
use crate::template;

/// Fill an emptied copy of `config` with `total_electrons`.
///
/// Energy groups are visited lowest first. Each group gets one electron per
/// orbital, then a second pass pairs them up, both only while budget remains.
/// Electrons beyond the configuration's capacity are dropped.
pub fn ground_state(config: &Configuration, total_electrons: u32) -> Configuration {
    let mut filled = config.emptied();
    let mut remaining = total_electrons;

    let groups: Vec<Vec<&'static str>> = config
        .energy_groups()
        .iter()
        .map(|group| group.orbitals.iter().map(|o| o.id).collect())
        .collect();

    for group in &groups {
        if remaining == 0 {
            break;
        }
        for pass in 1..=2u8 {
            for id in group {
                if remaining == 0 {
                    break;
                }
                let Some(orbital) = filled.get_mut(id) else {
                    continue;
                };
                if orbital.electrons() == pass - 1 && orbital.set_electrons(pass).is_ok() {
                    remaining -= 1;
                }
            }
        }
    }

    if remaining > 0 {
        log::warn!("ground state: {} electrons left over after filling", remaining);
    }
    filled
}

/// The answer key for `molecule`.
pub fn ground_state_for(molecule: &Molecule) -> Configuration {
    ground_state(&template::generate(molecule.ordering), molecule.total_electrons)
}
