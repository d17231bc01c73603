use serde::{Deserialize, Serialize};

use super::{Au, Unit};

pub trait DistanceUnit: Unit {}

/// Distance value tagged with its unit.
/// # Examples
/// ```
/// use quantum::units::{Au, distance_units::{Distance, Micrometer}};
/// let distance = Distance(5.0, Micrometer);
/// let distance_au = distance.to(Au);
/// assert!((distance.to_au() - distance_au.value()).abs() < 1e-6);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Distance<U: DistanceUnit>(pub f64, pub U);

impl<U: DistanceUnit> Distance<U> {
    pub fn to_au(&self) -> f64 {
        self.1.to_au(self.0)
    }

    pub fn to<V: DistanceUnit>(&self, unit: V) -> Distance<V> {
        Distance(unit.from_au(self.to_au()), unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> U {
        self.1
    }
}

impl DistanceUnit for Au {}

#[derive(Copy, Clone, Debug)]
pub struct Angstrom;

impl Unit for Angstrom {
    const TO_AU_MUL: f64 = 1.8897261246;
}
impl DistanceUnit for Angstrom {}

#[derive(Copy, Clone, Debug)]
pub struct Micrometer;

impl Unit for Micrometer {
    const TO_AU_MUL: f64 = 18897.261246;
}
impl DistanceUnit for Micrometer {}

/// Runtime selection of a distance unit, used by configuration files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnitKind {
    #[default]
    Au,
    Angstrom,
    Micrometer,
}

impl DistanceUnitKind {
    pub fn to_au(&self, value: f64) -> f64 {
        match self {
            Self::Au => Distance(value, Au).to_au(),
            Self::Angstrom => Distance(value, Angstrom).to_au(),
            Self::Micrometer => Distance(value, Micrometer).to_au(),
        }
    }
}
