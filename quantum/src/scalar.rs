use std::{
    fmt::{Debug, Display},
    ops::{Add, Div, Mul, Neg, Sub},
};

use faer::traits::ComplexField;
use num::{Complex, Float, One, Zero};

/// Real field underlying a [`Scalar`].
pub trait RealScalar: Float + Debug + Display + Default + Send + Sync + 'static {
    fn cast(value: f64) -> Self;

    /// Threshold below which computed values are treated as exact zeros.
    fn numerical_precision() -> Self {
        Self::cast(100.0) * Self::epsilon()
    }
}

impl RealScalar for f32 {
    fn cast(value: f64) -> Self {
        value as f32
    }
}

impl RealScalar for f64 {
    fn cast(value: f64) -> Self {
        value
    }
}

/// Matrix element type of operators, either real or complex.
pub trait Scalar:
    ComplexField<Real: RealScalar>
    + Copy
    + PartialEq
    + Debug
    + Send
    + Sync
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    const IS_COMPLEX: bool;

    fn from_real(value: Self::Real) -> Self;

    /// Converts a complex number, dropping the imaginary part for real fields.
    fn from_complex(value: Complex<Self::Real>) -> Self;

    fn re(self) -> Self::Real;

    fn modulus(self) -> Self::Real;

    fn conjugate(self) -> Self;
}

macro_rules! impl_real_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const IS_COMPLEX: bool = false;

                fn from_real(value: $t) -> Self {
                    value
                }

                fn from_complex(value: Complex<$t>) -> Self {
                    value.re
                }

                fn re(self) -> $t {
                    self
                }

                fn modulus(self) -> $t {
                    self.abs()
                }

                fn conjugate(self) -> Self {
                    self
                }
            }
        )*
    };
}

macro_rules! impl_complex_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for Complex<$t> {
                const IS_COMPLEX: bool = true;

                fn from_real(value: $t) -> Self {
                    Complex::new(value, 0.0)
                }

                fn from_complex(value: Complex<$t>) -> Self {
                    value
                }

                fn re(self) -> $t {
                    self.re
                }

                fn modulus(self) -> $t {
                    self.norm()
                }

                fn conjugate(self) -> Self {
                    self.conj()
                }
            }
        )*
    };
}

impl_real_scalar!(f32, f64);
impl_complex_scalar!(f32, f64);
