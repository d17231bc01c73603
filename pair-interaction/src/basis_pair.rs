use std::{
    ops::Range,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use num::{Float, One};
use quantum::{
    scalar::{RealScalar, Scalar},
    transform::{Sorting, TransformError, Transformable, TransformationType},
};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{
    atom::AtomSystem,
    error::{PairError, Result},
    ket::{KetPair, Parity},
    window::Window,
};

/// Product basis of the eigenstates of two atom systems.
pub struct BasisPair<S: Scalar> {
    id: String,
    kets: Vec<Arc<KetPair<S::Real>>>,
    ket_index: FxHashMap<usize, usize>,
    index_ranges: Vec<Range<usize>>,
    systems: [Arc<dyn AtomSystem<S>>; 2],
}

impl<S: Scalar> BasisPair<S> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kets(&self) -> &[Arc<KetPair<S::Real>>] {
        &self.kets
    }

    pub fn number_of_states(&self) -> usize {
        self.kets.len()
    }

    pub fn number_of_states1(&self) -> usize {
        self.systems[0].number_of_states()
    }

    pub fn number_of_states2(&self) -> usize {
        self.systems[1].number_of_states()
    }

    pub fn system1(&self) -> &Arc<dyn AtomSystem<S>> {
        &self.systems[0]
    }

    pub fn system2(&self) -> &Arc<dyn AtomSystem<S>> {
        &self.systems[1]
    }

    /// Position of the pair state built from the eigenstates `idx1` and `idx2`,
    /// `None` if this combination was not added to the basis.
    pub fn ket_index_from_tuple(&self, idx1: usize, idx2: usize) -> Option<usize> {
        let number_of_states2 = self.number_of_states2();
        if idx2 >= number_of_states2 {
            return None;
        }

        self.ket_index
            .get(&(idx1 * number_of_states2 + idx2))
            .copied()
    }

    pub fn tuple_from_ket_index(&self, index: usize) -> (usize, usize) {
        let id = self.kets[index].id();
        let number_of_states2 = self.number_of_states2();

        (id / number_of_states2, id % number_of_states2)
    }

    /// Energetically allowed range of the second index for the first index `idx1`.
    pub fn index_range(&self, idx1: usize) -> Range<usize> {
        self.index_ranges[idx1].clone()
    }

    pub fn energy(&self, index: usize) -> S::Real {
        self.kets[index].energy()
    }

    pub fn quantum_number_f(&self, index: usize) -> Option<S::Real> {
        self.kets[index].quantum_number_f()
    }

    pub fn quantum_number_m(&self, index: usize) -> Option<S::Real> {
        self.kets[index].quantum_number_m()
    }

    pub fn parity(&self, index: usize) -> Parity {
        self.kets[index].parity()
    }

    pub fn has_quantum_number_f(&self) -> bool {
        !self.kets.is_empty() && self.kets.iter().all(|k| k.quantum_number_f().is_some())
    }

    pub fn has_quantum_number_m(&self) -> bool {
        self.systems[0].has_quantum_number_m() && self.systems[1].has_quantum_number_m()
    }

    pub fn has_parity(&self) -> bool {
        !self.kets.is_empty() && self.kets.iter().all(|k| k.parity().is_known())
    }

    pub fn sort_keys(
        &self,
        label: TransformationType,
    ) -> std::result::Result<Vec<S::Real>, TransformError> {
        let keys: Option<Vec<S::Real>> = match label {
            TransformationType::SortByEnergy => Some(self.kets.iter().map(|k| k.energy()).collect()),
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

    /// Basis with the pair states reordered by `sorting`.
    pub fn sorted(&self, sorting: &Sorting) -> std::result::Result<Self, TransformError> {
        sorting.check_size(self.kets.len())?;

        let kets: Vec<_> = sorting
            .permutation()
            .iter()
            .map(|&i| self.kets[i].clone())
            .collect();

        Ok(Self {
            id: self.id.clone(),
            ket_index: index_of_kets(&kets),
            kets,
            index_ranges: self.index_ranges.clone(),
            systems: self.systems.clone(),
        })
    }
}

fn index_of_kets<R: RealScalar>(kets: &[Arc<KetPair<R>>]) -> FxHashMap<usize, usize> {
    kets.iter()
        .enumerate()
        .map(|(position, ket)| (ket.id(), position))
        .collect()
}

fn timestamp_id() -> String {
    let nanoseconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    format!("{nanoseconds:016x}")
}

/// Builder of a [`BasisPair`] from two diagonalized atom systems.
///
/// # Example
/// ```
/// use pair_interaction::{atom::SystemAtom, basis_pair::BasisPairCreator, ket::{KetAtom, Parity}};
///
/// let kets = vec![
///     KetAtom::new("s", 0.0, None, Some(0.5), Parity::Even),
///     KetAtom::new("p", 1.0, None, Some(-0.5), Parity::Odd),
/// ];
/// let system = SystemAtom::<f64>::from_kets(kets);
///
/// let mut creator = BasisPairCreator::new();
/// creator.add(system.clone())?.add(system)?.restrict_energy(0.5, 1.5)?;
/// let basis = creator.create()?;
///
/// assert_eq!(basis.number_of_states(), 2);
/// # Ok::<(), pair_interaction::error::PairError>(())
/// ```
pub struct BasisPairCreator<S: Scalar> {
    systems: Vec<Box<dyn AtomSystem<S>>>,
    range_energy: Window<S::Real>,
    range_quantum_number_m: Window<S::Real>,
    product_of_parities: Option<Parity>,
}

impl<S: Scalar> Default for BasisPairCreator<S> {
    fn default() -> Self {
        Self {
            systems: vec![],
            range_energy: Window::Infinite,
            range_quantum_number_m: Window::Infinite,
            product_of_parities: None,
        }
    }
}

impl<S: Scalar> BasisPairCreator<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<A: AtomSystem<S> + 'static>(&mut self, system: A) -> Result<&mut Self> {
        if !system.is_diagonal() {
            return Err(PairError::NotDiagonal);
        }
        self.systems.push(Box::new(system));

        Ok(self)
    }

    pub fn restrict_energy(&mut self, min: S::Real, max: S::Real) -> Result<&mut Self> {
        self.range_energy = Window::new("energy", min, max)?;

        Ok(self)
    }

    pub fn restrict_quantum_number_m(&mut self, min: S::Real, max: S::Real) -> Result<&mut Self> {
        let window = Window::new("m", min, max)?;
        if self.systems.len() == 2 && !self.systems.iter().all(|s| s.has_quantum_number_m()) {
            return Err(PairError::UndefinedQuantumNumber("m"));
        }
        self.range_quantum_number_m = window;

        Ok(self)
    }

    pub fn restrict_product_of_parities(&mut self, parity: Parity) -> Result<&mut Self> {
        if !parity.is_known()
            || (self.systems.len() == 2 && !self.systems.iter().all(|s| s.has_parity()))
        {
            return Err(PairError::UndefinedQuantumNumber("parity"));
        }
        self.product_of_parities = Some(parity);

        Ok(self)
    }

    fn check_restrictions(&self) -> Result<()> {
        if self.range_quantum_number_m.is_finite()
            && !self.systems.iter().all(|s| s.has_quantum_number_m())
        {
            return Err(PairError::UndefinedQuantumNumber("m"));
        }
        if self.product_of_parities.is_some() && !self.systems.iter().all(|s| s.has_parity()) {
            return Err(PairError::UndefinedQuantumNumber("parity"));
        }

        Ok(())
    }

    pub fn create(self) -> Result<Arc<BasisPair<S>>> {
        if self.systems.len() != 2 {
            return Err(PairError::WrongNumberOfSystems(self.systems.len()));
        }
        self.check_restrictions()?;

        let Self {
            mut systems,
            range_energy,
            range_quantum_number_m,
            product_of_parities,
        } = self;

        for system in systems.iter_mut() {
            let sorter = system.get_sorter(&[TransformationType::SortByEnergy])?;
            system.sort(&sorter)?;
        }
        let [system1, system2]: [Box<dyn AtomSystem<S>>; 2] = systems
            .try_into()
            .map_err(|s: Vec<_>| PairError::WrongNumberOfSystems(s.len()))?;

        let precision = S::Real::cast(10.0) * S::Real::epsilon();
        let eigenvalues1 = system1.eigenvalues();
        let eigenvalues2 = system2.eigenvalues();
        let number_of_states2 = eigenvalues2.len();
        let has_quantum_number_m =
            system1.has_quantum_number_m() && system2.has_quantum_number_m();

        let mut kets = Vec::with_capacity(eigenvalues1.len() * number_of_states2);
        let mut index_ranges = Vec::with_capacity(eigenvalues1.len());

        for (idx1, &energy1) in eigenvalues1.iter().enumerate() {
            let range = match range_energy {
                Window::Infinite => 0..number_of_states2,
                Window::Finite { min, max } => {
                    let min2 = min - energy1;
                    let max2 = max - energy1;

                    eigenvalues2.partition_point(|&e| e < min2)
                        ..eigenvalues2.partition_point(|&e| e <= max2)
                }
            };
            index_ranges.push(range.clone());

            for idx2 in range {
                let energy2 = eigenvalues2[idx2];
                let energy = energy1 + energy2;
                // The window edges are shifted by energy1, so rounding scales with the constituents.
                let tolerance = precision * (S::Real::one() + energy1.abs() + energy2.abs());
                if !range_energy.contains_within(energy, tolerance) {
                    return Err(PairError::Numerical(format!(
                        "pair energy {energy} of ({idx1}, {idx2}) lies outside the allowed range"
                    )));
                }

                let quantum_number_m = if has_quantum_number_m {
                    system1
                        .quantum_number_m(idx1)
                        .zip(system2.quantum_number_m(idx2))
                        .map(|(m1, m2)| m1 + m2)
                } else {
                    None
                };
                if let Some(m) = quantum_number_m {
                    if !range_quantum_number_m.contains_within(m, precision) {
                        continue;
                    }
                }

                if let Some(parity) = product_of_parities {
                    if system1.parity(idx1) * system2.parity(idx2) != parity {
                        continue;
                    }
                }

                kets.push(Arc::new(KetPair::new(
                    idx1 * number_of_states2 + idx2,
                    energy,
                    quantum_number_m,
                    [
                        system1.corresponding_ket(idx1),
                        system2.corresponding_ket(idx2),
                    ],
                )));
            }
        }
        kets.shrink_to_fit();

        let id = timestamp_id();
        info!(
            id = id.as_str(),
            states = kets.len(),
            states1 = eigenvalues1.len(),
            states2 = number_of_states2,
            "created pair basis"
        );
        debug!(?range_energy, ?range_quantum_number_m, ?product_of_parities, "pair basis restrictions");

        Ok(Arc::new(BasisPair {
            id,
            ket_index: index_of_kets(&kets),
            kets,
            index_ranges,
            systems: [Arc::from(system1), Arc::from(system2)],
        }))
    }
}
