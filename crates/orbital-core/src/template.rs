//! Empty orbital templates per ordering class.

use crate::catalog::OrderingClass;
use crate::orbital::{CharacterType, Configuration, Orbital, Shell};

use CharacterType::{Antibonding, Bonding};

/// Build a fresh, empty configuration for `ordering`.
///
/// The 1s/2s shells are shared. In the 2p shell, `Standard` puts σ2p (rank 4)
/// below the π2p pair (rank 5); `Mixing` swaps them. Antibonding π*2p (6) and
/// σ*2p (7) are the same for both.
pub fn generate(ordering: OrderingClass) -> Configuration {
    let mut orbitals = vec![
        Orbital::new("s1", "σ1s", 0, Bonding, Shell::S1),
        Orbital::new("s1*", "σ*1s", 1, Antibonding, Shell::S1),
        Orbital::new("s2", "σ2s", 2, Bonding, Shell::S2),
        Orbital::new("s2*", "σ*2s", 3, Antibonding, Shell::S2),
    ];

    match ordering {
        OrderingClass::Standard => orbitals.extend([
            Orbital::new("s2p", "σ2p", 4, Bonding, Shell::P2),
            Orbital::new("pi2p_a", "π2p", 5, Bonding, Shell::P2),
            Orbital::new("pi2p_b", "π2p", 5, Bonding, Shell::P2),
        ]),
        OrderingClass::Mixing => orbitals.extend([
            Orbital::new("pi2p_a", "π2p", 4, Bonding, Shell::P2),
            Orbital::new("pi2p_b", "π2p", 4, Bonding, Shell::P2),
            Orbital::new("s2p", "σ2p", 5, Bonding, Shell::P2),
        ]),
    }

    orbitals.extend([
        Orbital::new("pi2p*_a", "π*2p", 6, Antibonding, Shell::P2),
        Orbital::new("pi2p*_b", "π*2p", 6, Antibonding, Shell::P2),
        Orbital::new("s2p*", "σ*2p", 7, Antibonding, Shell::P2),
    ]);

    Configuration::new(orbitals)
}
