//! Surface of the single-atom layer needed to build pair systems.
//!
//! Single-atom bases, their database lookups and diagonalization live outside
//! of this crate. [`AtomSystem`] describes what a diagonalized single-atom
//! system must provide, [`SystemAtom`] is an in-memory implementation built
//! from already known eigenstates.

use std::sync::Arc;

use quantum::{
    scalar::{RealScalar, Scalar},
    sparse::{self, SparseMatrix},
    transform::{Sorting, TransformError, Transformable, TransformationType},
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PairError, Result},
    ket::{KetAtom, Parity},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorType {
    /// Unperturbed Hamiltonian.
    Energy,
    ElectricDipole,
    ElectricQuadrupole,
    /// Scalar (trace) part of the electric quadrupole.
    ElectricQuadrupoleZero,
}

pub trait AtomSystem<S: Scalar>: Transformable<S> + Send + Sync {
    fn number_of_states(&self) -> usize;

    /// Whether the Hamiltonian is diagonal in the system's own basis.
    fn is_diagonal(&self) -> bool;

    /// Eigenvalues aligned with the basis order.
    fn eigenvalues(&self) -> Vec<S::Real>;

    fn has_quantum_number_f(&self) -> bool;

    fn has_quantum_number_m(&self) -> bool;

    fn has_parity(&self) -> bool;

    fn quantum_number_f(&self, index: usize) -> Option<S::Real>;

    fn quantum_number_m(&self, index: usize) -> Option<S::Real>;

    fn parity(&self, index: usize) -> Parity;

    /// Ket with the largest overlap to the eigenstate at `index`.
    fn corresponding_ket(&self, index: usize) -> Arc<KetAtom<S::Real>>;

    /// Spherical component `q` of an operator in the system's basis.
    fn operator_matrix(&self, operator: OperatorType, q: i32) -> Result<SparseMatrix<S>>;
}

/// Single-atom system with explicitly provided states and operator matrices.
#[derive(Clone)]
pub struct SystemAtom<S: Scalar> {
    kets: Vec<Arc<KetAtom<S::Real>>>,
    hamiltonian: SparseMatrix<S>,
    operators: FxHashMap<(OperatorType, i32), SparseMatrix<S>>,
}

impl<S: Scalar> SystemAtom<S> {
    /// System with the given Hamiltonian, `kets[i]` labels the state `i`.
    pub fn new(kets: Vec<KetAtom<S::Real>>, hamiltonian: SparseMatrix<S>) -> Result<Self> {
        check_shape(&hamiltonian, kets.len())?;

        Ok(Self {
            kets: kets.into_iter().map(Arc::new).collect(),
            hamiltonian,
            operators: FxHashMap::default(),
        })
    }

    /// Diagonal system whose eigenvalues are the ket energies.
    pub fn from_kets(kets: Vec<KetAtom<S::Real>>) -> Self {
        let energies: Vec<S> = kets.iter().map(|k| S::from_real(k.energy())).collect();

        Self {
            kets: kets.into_iter().map(Arc::new).collect(),
            hamiltonian: sparse::diagonal(&energies),
            operators: FxHashMap::default(),
        }
    }

    pub fn with_operator(
        mut self,
        operator: OperatorType,
        q: i32,
        matrix: SparseMatrix<S>,
    ) -> Result<Self> {
        check_shape(&matrix, self.kets.len())?;
        self.operators.insert((operator, q), matrix);

        Ok(self)
    }

    pub fn kets(&self) -> &[Arc<KetAtom<S::Real>>] {
        &self.kets
    }
}

fn check_shape<S: Scalar>(matrix: &SparseMatrix<S>, expected: usize) -> Result<()> {
    if matrix.nrows() != expected || matrix.ncols() != expected {
        return Err(PairError::ShapeMismatch {
            expected,
            found: (matrix.nrows(), matrix.ncols()),
        });
    }

    Ok(())
}

impl<S: Scalar> Transformable<S> for SystemAtom<S> {
    fn matrix(&self) -> &SparseMatrix<S> {
        &self.hamiltonian
    }

    fn sort_keys(&self, label: TransformationType) -> std::result::Result<Vec<S::Real>, TransformError> {
        let keys: Option<Vec<S::Real>> = match label {
            TransformationType::SortByEnergy => Some(self.eigenvalues()),
            TransformationType::SortByQuantumNumberF => {
                self.kets.iter().map(|k| k.quantum_number_f()).collect()
            }
            TransformationType::SortByQuantumNumberM => {
                self.kets.iter().map(|k| k.quantum_number_m()).collect()
            }
            TransformationType::SortByParity => {
                self.kets.iter().map(|k| k.parity().sign()).collect()
            }
        };

        keys.ok_or(TransformError::UndefinedLabel(label))
    }

    fn sort(&mut self, sorting: &Sorting) -> std::result::Result<(), TransformError> {
        sorting.check_size(self.kets.len())?;
        let permutation = sorting.permutation();

        self.kets = permutation.iter().map(|&i| self.kets[i].clone()).collect();
        self.hamiltonian = sparse::permuted(&self.hamiltonian, permutation);
        for matrix in self.operators.values_mut() {
            *matrix = sparse::permuted(matrix, permutation);
        }

        Ok(())
    }
}

impl<S: Scalar> AtomSystem<S> for SystemAtom<S> {
    fn number_of_states(&self) -> usize {
        self.kets.len()
    }

    fn is_diagonal(&self) -> bool {
        let precision = S::Real::numerical_precision();

        sparse::entries(&self.hamiltonian)
            .iter()
            .all(|t| t.row == t.col || t.val.modulus() <= precision)
    }

    fn eigenvalues(&self) -> Vec<S::Real> {
        (0..self.kets.len())
            .map(|i| sparse::get(&self.hamiltonian, i, i).re())
            .collect()
    }

    fn has_quantum_number_f(&self) -> bool {
        self.kets.iter().all(|k| k.quantum_number_f().is_some())
    }

    fn has_quantum_number_m(&self) -> bool {
        self.kets.iter().all(|k| k.quantum_number_m().is_some())
    }

    fn has_parity(&self) -> bool {
        self.kets.iter().all(|k| k.parity().is_known())
    }

    fn quantum_number_f(&self, index: usize) -> Option<S::Real> {
        self.kets[index].quantum_number_f()
    }

    fn quantum_number_m(&self, index: usize) -> Option<S::Real> {
        self.kets[index].quantum_number_m()
    }

    fn parity(&self, index: usize) -> Parity {
        self.kets[index].parity()
    }

    fn corresponding_ket(&self, index: usize) -> Arc<KetAtom<S::Real>> {
        self.kets[index].clone()
    }

    fn operator_matrix(&self, operator: OperatorType, q: i32) -> Result<SparseMatrix<S>> {
        if operator == OperatorType::Energy && q == 0 {
            return Ok(self.hamiltonian.clone());
        }

        self.operators
            .get(&(operator, q))
            .cloned()
            .ok_or(PairError::MissingOperator { operator, q })
    }
}
