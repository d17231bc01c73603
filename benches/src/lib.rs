use std::sync::Arc;

use faer::sparse::Triplet;
use pair_interaction::{
    atom::{OperatorType, SystemAtom},
    basis_pair::{BasisPair, BasisPairCreator},
    ket::{KetAtom, Parity},
};
use quantum::sparse::{self, SparseMatrix};
use rand::Rng;

/// Hermitian operator with random elements within `bandwidth` of the diagonal.
pub fn banded_operator(size: usize, bandwidth: usize) -> SparseMatrix<f64> {
    let mut rng = rand::rng();
    let mut triplets = Vec::new();

    for i in 0..size {
        for j in (i + 1)..(i + 1 + bandwidth).min(size) {
            let value = rng.random_range(-1.0..=1.0);
            triplets.push(Triplet::new(i, j, value));
            triplets.push(Triplet::new(j, i, value));
        }
    }

    sparse::from_triplets(size, size, triplets)
}

/// Atom with `size` equally spaced levels in [0, 1) and a random dipole operator.
pub fn atom(size: usize) -> SystemAtom<f64> {
    let kets = (0..size)
        .map(|i| KetAtom::new(format!("{i}"), i as f64 / size as f64, None, None, Parity::Unknown))
        .collect();

    [-1, 0, 1]
        .into_iter()
        .try_fold(SystemAtom::from_kets(kets), |atom, q| {
            atom.with_operator(OperatorType::ElectricDipole, q, banded_operator(size, 8))
        })
        .expect("operators match the number of states")
}

/// Pair basis of two `size` level atoms, restricted to a pair energy window of
/// the given half width around 1.
pub fn setup(size: usize, half_width: Option<f64>) -> (Arc<BasisPair<f64>>, SparseMatrix<f64>) {
    let mut creator = BasisPairCreator::new();
    creator
        .add(atom(size))
        .and_then(|c| c.add(atom(size)))
        .expect("atoms are diagonal");
    if let Some(half_width) = half_width {
        creator
            .restrict_energy(1.0 - half_width, 1.0 + half_width)
            .expect("window is well formed");
    }
    let basis = creator.create().expect("two atoms were added");

    (basis, banded_operator(size, 8))
}
