use quantum::scalar::RealScalar;

use crate::error::{PairError, Result};

/// Closed interval restriction of a quantity, unrestricted by default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Window<R> {
    #[default]
    Infinite,
    Finite { min: R, max: R },
}

impl<R: RealScalar> Window<R> {
    pub fn new(quantity: &'static str, min: R, max: R) -> Result<Self> {
        if min > max || min.is_nan() || max.is_nan() {
            return Err(PairError::MalformedWindow {
                quantity,
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self::Finite { min, max })
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite { .. })
    }

    pub fn contains(&self, value: R) -> bool {
        self.contains_within(value, R::zero())
    }

    /// Inclusive check widened by `tolerance` on both ends.
    pub fn contains_within(&self, value: R, tolerance: R) -> bool {
        match *self {
            Self::Infinite => true,
            Self::Finite { min, max } => value >= min - tolerance && value <= max + tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let window = Window::new("energy", -1.0, 1.0).unwrap();

        assert!(window.is_finite());
        assert!(window.contains(1.0));
        assert!(!window.contains(1.0 + 1e-9));
        assert!(window.contains_within(1.0 + 1e-9, 1e-8));
        assert!(Window::<f64>::Infinite.contains(f64::MAX));
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Window::new("m", 2.0, 1.0),
            Err(PairError::MalformedWindow {
                quantity: "m",
                min: 2.0,
                max: 1.0
            })
        );
        assert!(Window::new("m", 0.0, 0.0).is_ok());
    }
}
