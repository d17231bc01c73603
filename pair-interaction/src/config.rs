use std::path::Path;

use quantum::{
    scalar::{RealScalar, Scalar},
    units::{distance_units::DistanceUnitKind, energy_units::EnergyUnitKind},
};
use serde::{Deserialize, Serialize};

use crate::{
    basis_pair::BasisPairCreator,
    error::{PairError, Result},
    ket::Parity,
    system_pair::SystemPair,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Parameters of a pair calculation.
///
/// ```json
/// {
///     "order": 3,
///     "distance_vector": [0.0, 0.0, 5.0],
///     "distance_unit": "micrometer",
///     "energy": { "min": -10.0, "max": 10.0 },
///     "energy_unit": "ghz"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    pub order: i32,
    pub distance_vector: Option<[f64; 3]>,
    pub distance_unit: DistanceUnitKind,
    pub energy: Option<Bounds>,
    pub energy_unit: EnergyUnitKind,
    pub quantum_number_m: Option<Bounds>,
    pub product_of_parities: Option<Parity>,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            order: 3,
            distance_vector: None,
            distance_unit: DistanceUnitKind::default(),
            energy: None,
            energy_unit: EnergyUnitKind::default(),
            quantum_number_m: None,
            product_of_parities: None,
        }
    }
}

impl PairConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PairError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PairError::Config(format!("{}: {e}", path.display())))?;

        Self::from_json(&json)
    }

    /// Restrictions of the pair basis in atomic units.
    pub fn apply_to_creator<S: Scalar>(&self, creator: &mut BasisPairCreator<S>) -> Result<()> {
        if let Some(energy) = self.energy {
            creator.restrict_energy(
                S::Real::cast(self.energy_unit.to_au(energy.min)),
                S::Real::cast(self.energy_unit.to_au(energy.max)),
            )?;
        }
        if let Some(m) = self.quantum_number_m {
            creator.restrict_quantum_number_m(S::Real::cast(m.min), S::Real::cast(m.max))?;
        }
        if let Some(parity) = self.product_of_parities {
            creator.restrict_product_of_parities(parity)?;
        }

        Ok(())
    }

    pub fn apply_to_system<S: Scalar>(&self, system: &mut SystemPair<S>) -> Result<()> {
        system.set_order(self.order)?;
        if let Some(vector) = self.distance_vector {
            system.set_distance_vector(vector.map(|x| S::Real::cast(self.distance_unit.to_au(x))))?;
        }

        Ok(())
    }
}
