//! Cartesian to spherical basis change of rank one and rank two tensors.

use num::Complex;
use quantum::scalar::RealScalar;

fn complex<R: RealScalar>(re: R, im: R) -> Complex<R> {
    Complex::new(re, im)
}

/// Rows are the spherical components q = -1, 0, +1 of a Cartesian vector.
pub fn kappa1<R: RealScalar>() -> [[Complex<R>; 3]; 3] {
    let zero = R::zero();
    let one = R::one();
    let s = R::cast(0.5).sqrt();

    [
        [complex(s, zero), complex(zero, -s), complex(zero, zero)],
        [complex(zero, zero), complex(zero, zero), complex(one, zero)],
        [complex(-s, zero), complex(zero, -s), complex(zero, zero)],
    ]
}

/// Rows are the spherical components q = -2, ..., +2 of a rank two Cartesian
/// tensor followed by its trace. Columns are ordered xx, xy, xz, yx, ..., zz.
pub fn kappa2<R: RealScalar>() -> [[Complex<R>; 9]; 6] {
    let o = complex(R::zero(), R::zero());
    let h = R::cast(0.5);
    let r = R::one() / R::cast(6.0).sqrt();
    let re = |x: R| complex(x, R::zero());
    let im = |x: R| complex(R::zero(), x);

    [
        [re(h), im(-h), o, im(-h), re(-h), o, o, o, o],
        [o, o, re(h), o, o, im(-h), re(h), im(-h), o],
        [re(-r), o, o, o, re(-r), o, o, o, re(r + r)],
        [o, o, re(-h), o, o, im(-h), re(-h), im(-h), o],
        [re(h), im(h), o, im(h), re(-h), o, o, o, o],
        [re(R::one()), o, o, o, re(R::one()), o, o, o, re(R::one())],
    ]
}

/// Returns `left * kernel * right^†`.
pub fn rotate<R: RealScalar, const A: usize, const I: usize, const J: usize, const B: usize>(
    left: &[[Complex<R>; I]; A],
    kernel: &[[R; J]; I],
    right: &[[Complex<R>; J]; B],
) -> [[Complex<R>; B]; A] {
    let mut result = [[complex(R::zero(), R::zero()); B]; A];

    for (a, row) in result.iter_mut().enumerate() {
        for (b, value) in row.iter_mut().enumerate() {
            for i in 0..I {
                for j in 0..J {
                    *value = *value + left[a][i] * right[b][j].conj() * kernel[i][j];
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn kappa1_is_unitary() {
        let kappa = kappa1::<f64>();
        let identity: [[f64; 3]; 3] = std::array::from_fn(|i| std::array::from_fn(|j| (i == j) as u8 as f64));
        let product = rotate(&kappa, &identity, &kappa);

        for (i, row) in product.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_relative_eq!(value.re, identity[i][j], epsilon = 1e-14);
                assert_relative_eq!(value.im, 0.0, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn kappa2_rank_two_rows_are_orthonormal() {
        let kappa = kappa2::<f64>();
        let identity: [[f64; 9]; 9] = std::array::from_fn(|i| std::array::from_fn(|j| (i == j) as u8 as f64));
        let product = rotate(&kappa, &identity, &kappa);

        for a in 0..5 {
            for b in 0..5 {
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_relative_eq!(product[a][b].re, expected, epsilon = 1e-14);
                assert_relative_eq!(product[a][b].im, 0.0, epsilon = 1e-14);
            }
            assert_relative_eq!(product[a][5].norm(), 0.0, epsilon = 1e-14);
        }
        assert_relative_eq!(product[5][5].re, 3.0, epsilon = 1e-14);
    }
}
