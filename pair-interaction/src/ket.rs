use std::{fmt::Display, ops::Mul, sync::Arc};

use quantum::scalar::RealScalar;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
    #[default]
    Unknown,
}

impl Parity {
    pub fn is_known(&self) -> bool {
        *self != Parity::Unknown
    }

    /// Sort key, `None` for an unknown parity.
    pub fn sign<R: RealScalar>(&self) -> Option<R> {
        match self {
            Parity::Even => Some(R::one()),
            Parity::Odd => Some(-R::one()),
            Parity::Unknown => None,
        }
    }
}

impl Mul for Parity {
    type Output = Parity;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Parity::Unknown, _) | (_, Parity::Unknown) => Parity::Unknown,
            (a, b) if a == b => Parity::Even,
            _ => Parity::Odd,
        }
    }
}

/// Single-atom state as provided by the atomic state database.
#[derive(Clone, Debug, PartialEq)]
pub struct KetAtom<R> {
    label: String,
    energy: R,
    quantum_number_f: Option<R>,
    quantum_number_m: Option<R>,
    parity: Parity,
}

impl<R: RealScalar> KetAtom<R> {
    pub fn new(
        label: impl Into<String>,
        energy: R,
        quantum_number_f: Option<R>,
        quantum_number_m: Option<R>,
        parity: Parity,
    ) -> Self {
        Self {
            label: label.into(),
            energy,
            quantum_number_f,
            quantum_number_m,
            parity,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn energy(&self) -> R {
        self.energy
    }

    pub fn quantum_number_f(&self) -> Option<R> {
        self.quantum_number_f
    }

    pub fn quantum_number_m(&self) -> Option<R> {
        self.quantum_number_m
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }
}

impl<R: RealScalar> Display for KetAtom<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Product state of two single-atom eigenstates.
///
/// The id is the linearized index `idx1 * n2 + idx2` of the constituent
/// eigenstates in their energy-sorted bases. Pair kets are only created
/// by [`crate::basis_pair::BasisPairCreator`].
#[derive(Clone, Debug)]
pub struct KetPair<R> {
    id: usize,
    energy: R,
    quantum_number_f: Option<R>,
    quantum_number_m: Option<R>,
    parity: Parity,
    kets: [Arc<KetAtom<R>>; 2],
}

impl<R: RealScalar> KetPair<R> {
    pub(crate) fn new(
        id: usize,
        energy: R,
        quantum_number_m: Option<R>,
        kets: [Arc<KetAtom<R>>; 2],
    ) -> Self {
        Self {
            id,
            energy,
            quantum_number_f: None,
            quantum_number_m,
            parity: Parity::Unknown,
            kets,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn energy(&self) -> R {
        self.energy
    }

    pub fn quantum_number_f(&self) -> Option<R> {
        self.quantum_number_f
    }

    pub fn quantum_number_m(&self) -> Option<R> {
        self.quantum_number_m
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Single-atom kets with the largest overlap to the constituent eigenstates.
    pub fn kets(&self) -> &[Arc<KetAtom<R>>; 2] {
        &self.kets
    }

    pub fn label(&self) -> String {
        format!("|{}; {}⟩", self.kets[0].label(), self.kets[1].label())
    }
}

impl<R: RealScalar> Display for KetPair<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_product() {
        assert_eq!(Parity::Even * Parity::Even, Parity::Even);
        assert_eq!(Parity::Odd * Parity::Odd, Parity::Even);
        assert_eq!(Parity::Odd * Parity::Even, Parity::Odd);
        assert_eq!(Parity::Unknown * Parity::Even, Parity::Unknown);
        assert_eq!(Parity::Odd.sign::<f64>(), Some(-1.0));
    }

    #[test]
    fn pair_label() {
        let s = Arc::new(KetAtom::new("Rb:60,S_1/2,1/2", 0.0, None, Some(0.5), Parity::Even));
        let p = Arc::new(KetAtom::new("Rb:60,P_1/2,-1/2", 0.1, None, Some(-0.5), Parity::Odd));
        let ket = KetPair::new(3, 0.1, Some(0.0), [s, p]);

        assert_eq!(ket.label(), "|Rb:60,S_1/2,1/2; Rb:60,P_1/2,-1/2⟩");
        assert_eq!(ket.quantum_number_f(), None);
        assert_eq!(ket.parity(), Parity::Unknown);
    }
}
