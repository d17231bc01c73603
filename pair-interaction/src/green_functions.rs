use std::array::from_fn;

use faer::sparse::Triplet;
use num::{Complex, Float, One, Zero};
use quantum::{
    scalar::{RealScalar, Scalar},
    sparse::{self, SparseMatrix},
};
use tracing::debug;

use crate::{
    error::{PairError, Result},
    spherical::{kappa1, kappa2, rotate},
};

/// Multipole coupling tensors in the spherical basis.
///
/// Dipole components are ordered q = -1, 0, +1, quadrupole components
/// q = -2, ..., +2 followed by the scalar part.
#[derive(Clone)]
pub struct GreenFunctions<S: Scalar> {
    dipole_dipole: SparseMatrix<S>,
    dipole_quadrupole: SparseMatrix<S>,
    quadrupole_dipole: SparseMatrix<S>,
    quadrupole_quadrupole: SparseMatrix<S>,
}

impl<S: Scalar> GreenFunctions<S> {
    fn zeros() -> Self {
        Self {
            dipole_dipole: sparse::zeros(3, 3),
            dipole_quadrupole: sparse::zeros(3, 6),
            quadrupole_dipole: sparse::zeros(6, 3),
            quadrupole_quadrupole: sparse::zeros(6, 6),
        }
    }

    pub fn dipole_dipole(&self) -> &SparseMatrix<S> {
        &self.dipole_dipole
    }

    pub fn dipole_quadrupole(&self) -> &SparseMatrix<S> {
        &self.dipole_quadrupole
    }

    pub fn quadrupole_dipole(&self) -> &SparseMatrix<S> {
        &self.quadrupole_dipole
    }

    pub fn quadrupole_quadrupole(&self) -> &SparseMatrix<S> {
        &self.quadrupole_quadrupole
    }
}

pub fn check_order(order: i32) -> Result<()> {
    if !(3..=5).contains(&order) {
        return Err(PairError::InvalidOrder(order));
    }

    Ok(())
}

/// Validates a separation vector, an infinite vector means no interaction.
pub fn check_distance_vector<S: Scalar>(distance_vector: &[S::Real; 3]) -> Result<()> {
    let precision = S::Real::numerical_precision();
    let distance = norm(distance_vector);

    if distance.is_nan() {
        return Err(PairError::Numerical("the distance vector contains NaN".into()));
    }
    if distance.is_infinite() {
        return Ok(());
    }
    if distance < precision {
        return Err(PairError::ZeroDistance);
    }
    if !S::IS_COMPLEX && distance_vector[1].abs() > precision {
        return Err(PairError::TransverseComponent);
    }

    Ok(())
}

fn norm<R: RealScalar>(vector: &[R; 3]) -> R {
    vector.iter().fold(R::zero(), |acc, &x| acc + x * x).sqrt()
}

pub fn construct_green_functions<S: Scalar>(
    distance_vector: [S::Real; 3],
    order: i32,
) -> Result<GreenFunctions<S>> {
    check_order(order)?;
    check_distance_vector::<S>(&distance_vector)?;

    let distance = norm(&distance_vector);
    if distance.is_infinite() {
        return Ok(GreenFunctions::zeros());
    }

    let n = distance_vector.map(|x| x / distance);
    let delta = |a: usize, b: usize| if a == b { S::Real::one() } else { S::Real::zero() };
    let c = |x: f64| S::Real::cast(x);

    let k1 = kappa1::<S::Real>();
    let k2 = kappa2::<S::Real>();
    let mut green_functions = GreenFunctions::zeros();

    if order >= 3 {
        let kernel: [[S::Real; 3]; 3] =
            from_fn(|i| from_fn(|j| delta(i, j) - c(3.0) * n[i] * n[j]));
        let tensor = rotate(&k1, &kernel, &k1);

        green_functions.dipole_dipole = sparsified(&tensor, distance.powi(3))?;
    }

    if order >= 4 {
        let kernel: [[S::Real; 9]; 3] = from_fn(|q| {
            from_fn(|col| {
                let (j, i) = (col / 3, col % 3);
                c(15.0) * n[q] * n[j] * n[i]
                    - c(3.0) * n[q] * delta(i, j)
                    - c(3.0) * n[j] * delta(i, q)
                    - c(3.0) * n[i] * delta(j, q)
            })
        });
        let tensor = rotate(&k1, &kernel, &k2);
        green_functions.dipole_quadrupole = sparsified(&tensor, distance.powi(4))?;

        let kernel: [[S::Real; 3]; 9] = from_fn(|row| {
            let (q, j) = (row / 3, row % 3);
            from_fn(|i| {
                -c(15.0) * n[q] * n[j] * n[i]
                    + c(3.0) * n[q] * delta(i, j)
                    + c(3.0) * n[j] * delta(i, q)
                    + c(3.0) * n[i] * delta(j, q)
            })
        });
        let tensor = rotate(&k2, &kernel, &k1);
        green_functions.quadrupole_dipole = sparsified(&tensor, distance.powi(4))?;
    }

    if order >= 5 {
        let kernel: [[S::Real; 9]; 9] = from_fn(|row| {
            let (q, j) = (row / 3, row % 3);
            from_fn(|col| {
                let (i, k) = (col / 3, col % 3);
                c(105.0) * n[q] * n[j] * n[i] * n[k]
                    - c(15.0) * n[q] * n[k] * delta(i, j)
                    - c(15.0) * n[j] * n[k] * delta(i, q)
                    - c(15.0) * n[i] * n[k] * delta(j, q)
                    - c(15.0) * n[j] * n[i] * delta(k, q)
                    - c(15.0) * n[q] * n[i] * delta(k, j)
                    - c(15.0) * n[q] * n[j] * delta(k, i)
                    + c(3.0) * delta(q, k) * delta(i, j)
                    + c(3.0) * delta(i, k) * delta(j, q)
                    + c(3.0) * delta(j, k) * delta(i, q)
            })
        });
        let tensor = rotate(&k2, &kernel, &k2);
        green_functions.quadrupole_quadrupole = sparsified(&tensor, distance.powi(5))?;
    }

    debug!(
        order,
        ?distance,
        dipole_dipole = sparse::nnz(&green_functions.dipole_dipole),
        dipole_quadrupole = sparse::nnz(&green_functions.dipole_quadrupole),
        quadrupole_dipole = sparse::nnz(&green_functions.quadrupole_dipole),
        quadrupole_quadrupole = sparse::nnz(&green_functions.quadrupole_quadrupole),
        "constructed green functions"
    );

    Ok(green_functions)
}

/// Drops entries below the numerical precision and divides the rest by `scale`.
fn sparsified<S: Scalar, const A: usize, const B: usize>(
    tensor: &[[Complex<S::Real>; B]; A],
    scale: S::Real,
) -> Result<SparseMatrix<S>> {
    let precision = S::Real::numerical_precision();
    let mut triplets = Vec::new();

    for (row, values) in tensor.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            if value.norm() <= precision {
                continue;
            }
            if !S::IS_COMPLEX && value.im.abs() > precision {
                return Err(PairError::Numerical(format!(
                    "green function entry ({row}, {col}) is complex for a real scalar type"
                )));
            }

            triplets.push(Triplet::new(row, col, S::from_complex(value / scale)));
        }
    }

    Ok(sparse::from_triplets(A, B, triplets))
}
