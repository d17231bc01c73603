use std::sync::Arc;

use quantum::{
    scalar::Scalar,
    sparse::{self, Entry, SparseMatrix},
    transform::{Sorting, TransformError, Transformable, TransformationType},
};

use crate::{
    atom::OperatorType,
    basis_pair::BasisPair,
    error::Result,
    tensor_product::calculate_tensor_product,
};

/// Operator acting on a pair basis.
#[derive(Clone)]
pub struct OperatorPair<S: Scalar> {
    basis: Arc<BasisPair<S>>,
    matrix: SparseMatrix<S>,
}

impl<S: Scalar> OperatorPair<S> {
    /// Diagonal operator of the pair energies.
    pub fn energy(basis: Arc<BasisPair<S>>) -> Self {
        let energies: Vec<S> = basis.kets().iter().map(|k| S::from_real(k.energy())).collect();

        Self {
            matrix: sparse::diagonal(&energies),
            basis,
        }
    }

    /// Product `O1(q1) ⊗ O2(q2)` of single-atom operators restricted to `basis`.
    pub fn from_product(
        basis: Arc<BasisPair<S>>,
        operators: [OperatorType; 2],
        q: [i32; 2],
    ) -> Result<Self> {
        let matrix1 = basis.system1().operator_matrix(operators[0], q[0])?;
        let matrix2 = basis.system2().operator_matrix(operators[1], q[1])?;
        let matrix = calculate_tensor_product(&basis, &matrix1, &matrix2)?;

        Ok(Self { basis, matrix })
    }

    pub fn basis(&self) -> &Arc<BasisPair<S>> {
        &self.basis
    }

    pub fn matrix(&self) -> &SparseMatrix<S> {
        &self.matrix
    }

    /// Compresses `entries` on `basis`, summing duplicates.
    pub(crate) fn from_entries(basis: Arc<BasisPair<S>>, entries: Vec<Entry<S>>) -> Self {
        let size = basis.number_of_states();

        Self {
            matrix: sparse::from_triplets(size, size, entries),
            basis,
        }
    }
}

impl<S: Scalar> Transformable<S> for OperatorPair<S> {
    fn matrix(&self) -> &SparseMatrix<S> {
        &self.matrix
    }

    fn sort_keys(&self, label: TransformationType) -> std::result::Result<Vec<S::Real>, TransformError> {
        self.basis.sort_keys(label)
    }

    fn sort(&mut self, sorting: &Sorting) -> std::result::Result<(), TransformError> {
        self.basis = Arc::new(self.basis.sorted(sorting)?);
        self.matrix = sparse::permuted(&self.matrix, sorting.permutation());

        Ok(())
    }
}
