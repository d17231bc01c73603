pub mod scalar;
pub mod sparse;
pub mod transform;
pub mod units;
