use faer::sparse::Triplet;
use pair_interaction::{
    atom::{OperatorType, SystemAtom},
    basis_pair::BasisPairCreator,
    config::{Bounds, PairConfig},
    error::PairError,
    ket::{KetAtom, Parity},
    system_pair::SystemPair,
};
use quantum::{
    sparse,
    units::{distance_units::DistanceUnitKind, energy_units::EnergyUnitKind},
};
use tracing::info;

/// Radial dipole matrix element between the toy S and P states in atomic units.
const RADIAL_DIPOLE: f64 = 1500.0;

/// Splitting between the toy S and P states in GHz.
const SPLITTING: f64 = 10.0;

/// S_1/2 and P_1/2 doublets coupled by the electric dipole operator.
fn rydberg_atom() -> Result<SystemAtom<f64>, PairError> {
    let energy_p = EnergyUnitKind::GHz.to_au(SPLITTING);
    let kets = vec![
        KetAtom::new("S_1/2,m=-1/2", 0.0, Some(0.5), Some(-0.5), Parity::Even),
        KetAtom::new("S_1/2,m=+1/2", 0.0, Some(0.5), Some(0.5), Parity::Even),
        KetAtom::new("P_1/2,m=-1/2", energy_p, Some(0.5), Some(-0.5), Parity::Odd),
        KetAtom::new("P_1/2,m=+1/2", energy_p, Some(0.5), Some(0.5), Parity::Odd),
    ];

    let c = RADIAL_DIPOLE / 3.0;
    let s = 2f64.sqrt() * c;
    let dipole = |entries: &[(usize, usize, f64)]| {
        let triplets = entries
            .iter()
            .map(|&(row, col, value)| Triplet::new(row, col, value))
            .collect();
        sparse::from_triplets(4, 4, triplets)
    };

    SystemAtom::from_kets(kets)
        .with_operator(
            OperatorType::ElectricDipole,
            -1,
            dipole(&[(2, 1, s), (0, 3, s)]),
        )?
        .with_operator(
            OperatorType::ElectricDipole,
            0,
            dipole(&[(3, 1, c), (1, 3, c), (2, 0, -c), (0, 2, -c)]),
        )?
        .with_operator(
            OperatorType::ElectricDipole,
            1,
            dipole(&[(3, 0, -s), (1, 2, -s)]),
        )
}

fn main() -> Result<(), PairError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PairConfig::from_file(path)?,
        None => PairConfig {
            distance_vector: Some([0.0, 0.0, 5.0]),
            distance_unit: DistanceUnitKind::Micrometer,
            energy: Some(Bounds {
                min: SPLITTING - 1.0,
                max: SPLITTING + 1.0,
            }),
            energy_unit: EnergyUnitKind::GHz,
            ..PairConfig::default()
        },
    };
    info!(?config, "pair configuration");

    let atom = rydberg_atom()?;
    let mut creator = BasisPairCreator::new();
    creator.add(atom.clone())?.add(atom)?;
    config.apply_to_creator(&mut creator)?;
    let basis = creator.create()?;

    let mut system = SystemPair::new(basis.clone());
    config.apply_to_system(&mut system)?;

    let labels = system.blockdiagonalizing_labels()?.to_vec();
    info!(?labels, "conserved quantities");

    let hamiltonian = system.hamiltonian()?;
    for entry in sparse::entries(hamiltonian.matrix()) {
        let to_ghz = EnergyUnitKind::GHz.to_au(1.0);
        info!(
            bra = %basis.kets()[entry.row],
            ket = %basis.kets()[entry.col],
            ghz = entry.val / to_ghz,
            "hamiltonian entry"
        );
    }

    Ok(())
}
