use faer::sparse::Triplet;
use quantum::sparse;

use crate::{
    atom::{OperatorType, SystemAtom},
    ket::{KetAtom, Parity},
};

/// Diagonal system labelled by the state indices.
pub fn ladder(energies: &[f64], quantum_numbers_m: Option<&[f64]>) -> SystemAtom<f64> {
    let kets = energies
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let m = quantum_numbers_m.map(|m| m[i]);
            KetAtom::new(i.to_string(), e, None, m, Parity::Unknown)
        })
        .collect();

    SystemAtom::from_kets(kets)
}

pub fn ladder_with_parity(energies: &[f64], parities: &[Parity]) -> SystemAtom<f64> {
    let kets = energies
        .iter()
        .zip(parities)
        .enumerate()
        .map(|(i, (&e, &p))| KetAtom::new(i.to_string(), e, None, None, p))
        .collect();

    SystemAtom::from_kets(kets)
}

/// Two-level atom with energies 0 and `excitation` at m = 0, coupled by a unit
/// `d_0` dipole element. The other dipole components vanish.
pub fn two_level_dipole(excitation: f64) -> SystemAtom<f64> {
    let coupling = sparse::from_triplets(
        2,
        2,
        vec![Triplet::new(0, 1, 1.0), Triplet::new(1, 0, 1.0)],
    );

    ladder(&[0.0, excitation], Some(&[0.0, 0.0]))
        .with_operator(OperatorType::ElectricDipole, 0, coupling)
        .and_then(|s| s.with_operator(OperatorType::ElectricDipole, -1, sparse::zeros(2, 2)))
        .and_then(|s| s.with_operator(OperatorType::ElectricDipole, 1, sparse::zeros(2, 2)))
        .unwrap()
}

/// Three states at m = 0, -1, +1 with dipole and quadrupole couplings obeying
/// `T_q^† = (-1)^q T_-q`.
pub fn three_level_multipole() -> SystemAtom<f64> {
    let matrix = |entries: &[(usize, usize, f64)]| {
        sparse::from_triplets(
            3,
            3,
            entries.iter().map(|&(row, col, value)| Triplet::new(row, col, value)).collect(),
        )
    };

    let operators = [
        (OperatorType::ElectricDipole, -1, matrix(&[(1, 0, -1.0), (0, 2, -0.5)])),
        (OperatorType::ElectricDipole, 0, matrix(&[(1, 1, 0.3), (2, 2, -0.3)])),
        (OperatorType::ElectricDipole, 1, matrix(&[(0, 1, 1.0), (2, 0, 0.5)])),
        (OperatorType::ElectricQuadrupole, -2, matrix(&[(1, 2, 0.6)])),
        (OperatorType::ElectricQuadrupole, -1, matrix(&[(1, 0, -0.4), (0, 2, -0.7)])),
        (OperatorType::ElectricQuadrupole, 0, matrix(&[(0, 0, 0.2), (1, 1, -0.1), (2, 2, -0.1)])),
        (OperatorType::ElectricQuadrupole, 1, matrix(&[(0, 1, 0.4), (2, 0, 0.7)])),
        (OperatorType::ElectricQuadrupole, 2, matrix(&[(2, 1, 0.6)])),
        (OperatorType::ElectricQuadrupoleZero, 0, matrix(&[(0, 0, 1.0), (1, 1, 2.0), (2, 2, 3.0)])),
    ];

    operators
        .into_iter()
        .try_fold(
            ladder(&[0.0, 1.0, 1.5], Some(&[0.0, -1.0, 1.0])),
            |system, (operator, q, matrix)| system.with_operator(operator, q, matrix),
        )
        .unwrap()
}
