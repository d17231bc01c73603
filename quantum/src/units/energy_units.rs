use serde::{Deserialize, Serialize};

use super::{Au, Unit};

pub trait EnergyUnit: Unit {}

/// Energy value tagged with its unit.
/// # Examples
/// ```
/// use quantum::units::energy_units::{Energy, GHz, MHz};
/// let energy = Energy(1.0, GHz);
/// let energy_mhz = energy.to(MHz);
/// assert!((energy_mhz.value() - 1000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Energy<U: EnergyUnit>(pub f64, pub U);

impl<U: EnergyUnit> Energy<U> {
    pub fn to_au(&self) -> f64 {
        self.1.to_au(self.0)
    }

    pub fn to<V: EnergyUnit>(&self, unit: V) -> Energy<V> {
        Energy(unit.from_au(self.to_au()), unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> U {
        self.1
    }
}

impl EnergyUnit for Au {}

#[derive(Copy, Clone, Debug)]
pub struct Kelvin;

impl Unit for Kelvin {
    const TO_AU_MUL: f64 = 3.1668105e-6;
}
impl EnergyUnit for Kelvin {}

#[derive(Copy, Clone, Debug)]
pub struct CmInv;

impl Unit for CmInv {
    const TO_AU_MUL: f64 = 4.5563352812e-6;
}
impl EnergyUnit for CmInv {}

#[derive(Copy, Clone, Debug)]
pub struct MHz;

impl Unit for MHz {
    const TO_AU_MUL: f64 = 1.51982850071586e-10;
}
impl EnergyUnit for MHz {}

#[derive(Copy, Clone, Debug)]
pub struct GHz;

impl Unit for GHz {
    const TO_AU_MUL: f64 = 1.51982850071586e-07;
}
impl EnergyUnit for GHz {}

/// Runtime selection of an energy unit, used by configuration files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnitKind {
    #[default]
    Au,
    #[serde(rename = "ghz")]
    GHz,
    #[serde(rename = "mhz")]
    MHz,
    CmInv,
    Kelvin,
}

impl EnergyUnitKind {
    pub fn to_au(&self, value: f64) -> f64 {
        match self {
            Self::Au => Energy(value, Au).to_au(),
            Self::GHz => Energy(value, GHz).to_au(),
            Self::MHz => Energy(value, MHz).to_au(),
            Self::CmInv => Energy(value, CmInv).to_au(),
            Self::Kelvin => Energy(value, Kelvin).to_au(),
        }
    }
}
