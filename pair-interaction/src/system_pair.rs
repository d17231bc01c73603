use std::sync::Arc;

use faer::sparse::Triplet;
use num::{Float, Zero};
use quantum::{
    scalar::Scalar,
    sparse::{self, SparseMatrix},
    transform::{Blocks, Sorting, Transformable, TransformationType},
};
use tracing::{debug, info};

use crate::{
    atom::{AtomSystem, OperatorType},
    basis_pair::BasisPair,
    error::Result,
    green_functions::{check_distance_vector, check_order, construct_green_functions},
    operator_pair::OperatorPair,
    tensor_product::tensor_product_entries,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    DipoleDipole,
    DipoleQuadrupole,
    QuadrupoleDipole,
    QuadrupoleQuadrupole,
}

impl Channel {
    /// Whether the green function component (`row`, `col`) conserves the total m.
    fn conserves_m(self, row: usize, col: usize) -> bool {
        match self {
            Channel::DipoleDipole | Channel::QuadrupoleQuadrupole => row == col,
            Channel::DipoleQuadrupole => row + 1 == col,
            Channel::QuadrupoleDipole => row == col + 1,
        }
    }
}

/// Components of one atom's operators ordered like the green function rows
/// or columns, with the sign of each component.
type Components = [(OperatorType, i32, bool)];

const DIPOLE_FIRST: &Components = &[
    (OperatorType::ElectricDipole, 1, true),
    (OperatorType::ElectricDipole, 0, false),
    (OperatorType::ElectricDipole, -1, true),
];

const DIPOLE_SECOND: &Components = &[
    (OperatorType::ElectricDipole, -1, false),
    (OperatorType::ElectricDipole, 0, false),
    (OperatorType::ElectricDipole, 1, false),
];

const QUADRUPOLE_FIRST: &Components = &[
    (OperatorType::ElectricQuadrupole, 2, false),
    (OperatorType::ElectricQuadrupole, 1, true),
    (OperatorType::ElectricQuadrupole, 0, false),
    (OperatorType::ElectricQuadrupole, -1, true),
    (OperatorType::ElectricQuadrupole, -2, false),
    (OperatorType::ElectricQuadrupoleZero, 0, false),
];

const QUADRUPOLE_SECOND: &Components = &[
    (OperatorType::ElectricQuadrupole, -2, false),
    (OperatorType::ElectricQuadrupole, -1, false),
    (OperatorType::ElectricQuadrupole, 0, false),
    (OperatorType::ElectricQuadrupole, 1, false),
    (OperatorType::ElectricQuadrupole, 2, false),
    (OperatorType::ElectricQuadrupoleZero, 0, false),
];

fn operator_components<S: Scalar>(
    system: &dyn AtomSystem<S>,
    components: &Components,
) -> Result<Vec<SparseMatrix<S>>> {
    components
        .iter()
        .map(|&(operator, q, negate)| {
            let matrix = system.operator_matrix(operator, q)?;

            Ok(if negate {
                sparse::scaled(&matrix, -S::one())
            } else {
                matrix
            })
        })
        .collect()
}

struct Hamiltonian<S: Scalar> {
    operator: OperatorPair<S>,
    is_diagonal: bool,
    blockdiagonalizing_labels: Vec<TransformationType>,
}

/// Interacting pair of atoms at a given separation.
///
/// The Hamiltonian is built on first access and rebuilt after the
/// interaction parameters changed.
pub struct SystemPair<S: Scalar> {
    basis: Arc<BasisPair<S>>,
    order: i32,
    distance_vector: [S::Real; 3],
    hamiltonian: Option<Hamiltonian<S>>,
}

impl<S: Scalar> SystemPair<S> {
    /// Non-interacting pair with dipole-dipole order and infinite separation.
    pub fn new(basis: Arc<BasisPair<S>>) -> Self {
        Self {
            basis,
            order: 3,
            distance_vector: [S::Real::zero(), S::Real::zero(), S::Real::infinity()],
            hamiltonian: None,
        }
    }

    pub fn basis(&self) -> &Arc<BasisPair<S>> {
        &self.basis
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn distance_vector(&self) -> [S::Real; 3] {
        self.distance_vector
    }

    /// Highest inverse power of the distance, 3 for dipole-dipole up to 5
    /// for quadrupole-quadrupole interaction.
    pub fn set_order(&mut self, order: i32) -> Result<&mut Self> {
        check_order(order)?;
        self.order = order;
        self.hamiltonian = None;

        Ok(self)
    }

    pub fn set_distance(&mut self, distance: S::Real) -> Result<&mut Self> {
        self.set_distance_vector([S::Real::zero(), S::Real::zero(), distance])
    }

    pub fn set_distance_vector(&mut self, distance_vector: [S::Real; 3]) -> Result<&mut Self> {
        check_distance_vector::<S>(&distance_vector)?;
        self.distance_vector = distance_vector;
        self.hamiltonian = None;

        Ok(self)
    }

    fn constructed(&mut self) -> Result<&mut Hamiltonian<S>> {
        let hamiltonian = match self.hamiltonian.take() {
            Some(hamiltonian) => hamiltonian,
            None => self.construct_hamiltonian()?,
        };

        Ok(self.hamiltonian.insert(hamiltonian))
    }

    pub fn hamiltonian(&mut self) -> Result<&OperatorPair<S>> {
        Ok(&self.constructed()?.operator)
    }

    pub fn is_diagonal(&mut self) -> Result<bool> {
        Ok(self.constructed()?.is_diagonal)
    }

    /// Labels that the Hamiltonian is block diagonal in, ordered f, m, parity.
    pub fn blockdiagonalizing_labels(&mut self) -> Result<&[TransformationType]> {
        Ok(&self.constructed()?.blockdiagonalizing_labels)
    }

    /// Reorders the pair states, the Hamiltonian is rebuilt in the new order
    /// whenever the interaction parameters change.
    pub fn transform(&mut self, sorting: &Sorting) -> Result<&mut Self> {
        let basis = {
            let hamiltonian = self.constructed()?;
            hamiltonian.operator.sort(sorting)?;
            hamiltonian.operator.basis().clone()
        };
        self.basis = basis;

        Ok(self)
    }

    pub fn get_sorter(&mut self, labels: &[TransformationType]) -> Result<Sorting> {
        Ok(self.constructed()?.operator.get_sorter(labels)?)
    }

    pub fn get_blocks(&mut self, labels: &[TransformationType]) -> Result<Blocks> {
        Ok(self.constructed()?.operator.get_blocks(labels)?)
    }

    fn construct_hamiltonian(&self) -> Result<Hamiltonian<S>> {
        let basis = &self.basis;
        let green_functions = construct_green_functions::<S>(self.distance_vector, self.order)?;

        let channels = [
            (Channel::DipoleDipole, green_functions.dipole_dipole()),
            (Channel::DipoleQuadrupole, green_functions.dipole_quadrupole()),
            (Channel::QuadrupoleDipole, green_functions.quadrupole_dipole()),
            (Channel::QuadrupoleQuadrupole, green_functions.quadrupole_quadrupole()),
        ];
        let active = |channel: Channel| {
            channels
                .iter()
                .any(|&(c, tensor)| c == channel && sparse::nnz(tensor) > 0)
        };

        let system1 = &**basis.system1();
        let system2 = &**basis.system2();
        let fetch = |system: &dyn AtomSystem<S>, components: &Components, needed: bool| {
            if needed {
                operator_components(system, components)
            } else {
                Ok(vec![])
            }
        };
        let d1 = fetch(
            system1,
            DIPOLE_FIRST,
            active(Channel::DipoleDipole) || active(Channel::DipoleQuadrupole),
        )?;
        let d2 = fetch(
            system2,
            DIPOLE_SECOND,
            active(Channel::DipoleDipole) || active(Channel::QuadrupoleDipole),
        )?;
        let q1 = fetch(
            system1,
            QUADRUPOLE_FIRST,
            active(Channel::QuadrupoleDipole) || active(Channel::QuadrupoleQuadrupole),
        )?;
        let q2 = fetch(
            system2,
            QUADRUPOLE_SECOND,
            active(Channel::DipoleQuadrupole) || active(Channel::QuadrupoleQuadrupole),
        )?;

        let mut entries = sparse::entries(OperatorPair::energy(basis.clone()).matrix());
        let mut is_diagonal = true;
        let mut conserves_f = basis.has_quantum_number_f();
        let mut conserves_m = basis.has_quantum_number_m();
        let conserves_parity = basis.has_parity();

        for (channel, tensor) in channels {
            if sparse::nnz(tensor) == 0 {
                continue;
            }
            let (operators1, operators2) = match channel {
                Channel::DipoleDipole => (&d1, &d2),
                Channel::DipoleQuadrupole => (&d1, &q2),
                Channel::QuadrupoleDipole => (&q1, &d2),
                Channel::QuadrupoleQuadrupole => (&q1, &q2),
            };

            for entry in sparse::entries(tensor) {
                let product =
                    tensor_product_entries(basis, &operators1[entry.row], &operators2[entry.col])?;
                entries.extend(
                    product
                        .into_iter()
                        .map(|t| Triplet::new(t.row, t.col, entry.val * t.val)),
                );

                conserves_m &= channel.conserves_m(entry.row, entry.col);
            }
            is_diagonal = false;
            conserves_f = false;

            debug!(?channel, components = sparse::nnz(tensor), "added interaction channel");
        }

        let operator = OperatorPair::from_entries(basis.clone(), entries);

        let blockdiagonalizing_labels = [
            (conserves_f, TransformationType::SortByQuantumNumberF),
            (conserves_m, TransformationType::SortByQuantumNumberM),
            (conserves_parity, TransformationType::SortByParity),
        ]
        .into_iter()
        .filter_map(|(conserved, label)| conserved.then_some(label))
        .collect::<Vec<_>>();

        info!(
            basis = basis.id(),
            states = basis.number_of_states(),
            nonzeros = sparse::nnz(operator.matrix()),
            order = self.order,
            labels = ?blockdiagonalizing_labels,
            "constructed pair hamiltonian"
        );

        Ok(Hamiltonian {
            operator,
            is_diagonal,
            blockdiagonalizing_labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        basis_pair::BasisPairCreator,
        error::PairError,
        test_systems::{three_level_multipole, two_level_dipole},
    };

    fn system(excitation2: f64) -> SystemPair<f64> {
        let mut creator = BasisPairCreator::new();
        creator
            .add(two_level_dipole(1.0))
            .unwrap()
            .add(two_level_dipole(excitation2))
            .unwrap();

        SystemPair::new(creator.create().unwrap())
    }

    fn diagonal(system: &mut SystemPair<f64>) -> Vec<f64> {
        let matrix = system.hamiltonian().unwrap().matrix();
        (0..matrix.nrows()).map(|i| sparse::get(matrix, i, i)).collect()
    }

    #[test]
    fn non_interacting_pair() {
        let mut system = system(1.0);

        assert_eq!(diagonal(&mut system), vec![0.0, 1.0, 1.0, 2.0]);
        assert!(system.is_diagonal().unwrap());
        assert_eq!(
            system.blockdiagonalizing_labels().unwrap(),
            &[TransformationType::SortByQuantumNumberM]
        );
    }

    #[test]
    fn dipole_dipole_pair() {
        let mut system = system(1.0);
        system.set_distance(2.0).unwrap();

        let matrix = system.hamiltonian().unwrap().matrix().clone();
        assert!(sparse::is_hermitian(&matrix, 1e-14));
        assert_relative_eq!(sparse::get(&matrix, 0, 3), -2.0 / 8.0, epsilon = 1e-14);
        assert_relative_eq!(sparse::get(&matrix, 3, 0), -2.0 / 8.0, epsilon = 1e-14);
        assert_relative_eq!(sparse::get(&matrix, 1, 2), -2.0 / 8.0, epsilon = 1e-14);
        assert_relative_eq!(sparse::get(&matrix, 0, 1), 0.0);
        assert_eq!(diagonal(&mut system), vec![0.0, 1.0, 1.0, 2.0]);

        assert!(!system.is_diagonal().unwrap());
        assert_eq!(
            system.blockdiagonalizing_labels().unwrap(),
            &[TransformationType::SortByQuantumNumberM]
        );
    }

    #[test]
    fn distance_changes_only_coupling() {
        let mut system = system(1.0);
        system.set_distance(2.0).unwrap();
        let near = system.hamiltonian().unwrap().matrix().clone();

        system.set_distance(4.0).unwrap();
        let far = system.hamiltonian().unwrap().matrix().clone();

        for i in 0..4 {
            assert_eq!(sparse::get(&near, i, i), sparse::get(&far, i, i));
        }
        assert_relative_eq!(sparse::get(&near, 0, 3) / sparse::get(&far, 0, 3), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn off_axis_separation_breaks_m() {
        let mut system = system(1.0);
        system.set_distance_vector([2.0, 0.0, 0.0]).unwrap();

        assert!(system.blockdiagonalizing_labels().unwrap().is_empty());
        assert_relative_eq!(
            sparse::get(system.hamiltonian().unwrap().matrix(), 0, 3),
            1.0 / 8.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn failed_setters_keep_state() {
        let mut system = system(1.0);
        system.set_distance(2.0).unwrap();

        assert_eq!(system.set_order(2).err(), Some(PairError::InvalidOrder(2)));
        assert_eq!(system.order(), 3);
        assert_eq!(system.set_distance(0.0).err(), Some(PairError::ZeroDistance));
        assert_eq!(
            system.set_distance_vector([1.0, 1.0, 0.0]).err(),
            Some(PairError::TransverseComponent)
        );
        assert_eq!(system.distance_vector(), [0.0, 0.0, 2.0]);
    }

    #[test]
    fn higher_order_needs_quadrupole_operators() {
        let mut system = system(1.0);
        system.set_order(4).unwrap().set_distance(2.0).unwrap();

        assert!(matches!(
            system.hamiltonian().err(),
            Some(PairError::MissingOperator {
                operator: OperatorType::ElectricQuadrupole,
                ..
            })
        ));
    }

    #[test]
    fn quadrupole_channels_up_to_fifth_order() {
        let mut creator = BasisPairCreator::new();
        creator
            .add(three_level_multipole())
            .unwrap()
            .add(three_level_multipole())
            .unwrap();
        let mut system = SystemPair::new(creator.create().unwrap());
        system.set_order(5).unwrap().set_distance(2.0).unwrap();

        let matrix = system.hamiltonian().unwrap().matrix().clone();
        assert!(sparse::is_hermitian(&matrix, 1e-12));
        assert_relative_eq!(sparse::get(&matrix, 0, 0), 0.045, epsilon = 1e-12);
        assert_relative_eq!(sparse::get(&matrix, 1, 3), 0.005, epsilon = 1e-12);
        assert_relative_eq!(sparse::get(&matrix, 2, 6), -0.33625, epsilon = 1e-12);
        assert_relative_eq!(sparse::get(&matrix, 0, 5), -0.2800825214724777, epsilon = 1e-12);
        assert_eq!(
            system.blockdiagonalizing_labels().unwrap(),
            &[TransformationType::SortByQuantumNumberM]
        );

        system.set_distance_vector([1.0, 0.0, 2.0]).unwrap();
        let matrix = system.hamiltonian().unwrap().matrix();
        assert!(sparse::is_hermitian(matrix, 1e-12));
        assert_eq!(sparse::nnz(matrix), 81);
        assert!(system.blockdiagonalizing_labels().unwrap().is_empty());
    }

    #[test]
    fn transformed_system_is_rebuilt_in_sorted_order() {
        let mut system = system(10.0);
        system.set_distance(2.0).unwrap();
        assert_eq!(diagonal(&mut system), vec![0.0, 10.0, 1.0, 11.0]);

        let sorter = system.get_sorter(&[TransformationType::SortByEnergy]).unwrap();
        system.transform(&sorter).unwrap();
        assert_eq!(diagonal(&mut system), vec![0.0, 1.0, 10.0, 11.0]);
        assert_relative_eq!(
            sparse::get(system.hamiltonian().unwrap().matrix(), 1, 2),
            -0.25,
            epsilon = 1e-14
        );

        system.set_distance(4.0).unwrap();
        assert_eq!(diagonal(&mut system), vec![0.0, 1.0, 10.0, 11.0]);
        let matrix = system.hamiltonian().unwrap().matrix();
        assert_relative_eq!(sparse::get(matrix, 0, 3), -2.0 / 64.0, epsilon = 1e-14);
        assert_relative_eq!(sparse::get(matrix, 1, 2), -2.0 / 64.0, epsilon = 1e-14);

        let blocks = system
            .get_blocks(&[TransformationType::SortByQuantumNumberM])
            .unwrap();
        assert_eq!(blocks.starts(), &[0]);
    }
}
