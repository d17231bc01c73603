use faer::sparse::Triplet;
use quantum::{
    scalar::{RealScalar, Scalar},
    sparse::{self, Entry, SparseMatrix},
};
use rayon::prelude::*;
use tracing::trace;

use crate::{
    basis_pair::BasisPair,
    error::{PairError, Result},
};

/// Matrix of `matrix1 ⊗ matrix2` restricted to the states of `basis`.
///
/// `matrix1` and `matrix2` are given in the energy-sorted eigenbases of the
/// first and second atom system. Rows of `matrix1` are processed in parallel,
/// products below the numerical precision are not stored.
pub fn calculate_tensor_product<S: Scalar>(
    basis: &BasisPair<S>,
    matrix1: &SparseMatrix<S>,
    matrix2: &SparseMatrix<S>,
) -> Result<SparseMatrix<S>> {
    let triplets = tensor_product_entries(basis, matrix1, matrix2)?;
    let size = basis.number_of_states();

    Ok(sparse::from_triplets(size, size, triplets))
}

/// Uncompressed entries of [`calculate_tensor_product`], for summing several
/// products before a single compression.
pub(crate) fn tensor_product_entries<S: Scalar>(
    basis: &BasisPair<S>,
    matrix1: &SparseMatrix<S>,
    matrix2: &SparseMatrix<S>,
) -> Result<Vec<Entry<S>>> {
    check_shape(matrix1, basis.number_of_states1())?;
    check_shape(matrix2, basis.number_of_states2())?;

    let precision = S::Real::numerical_precision();

    let triplets: Vec<Entry<S>> = (0..matrix1.nrows())
        .into_par_iter()
        .flat_map_iter(|row1| {
            let mut triplets = Vec::new();
            let (cols1, values1) = sparse::row_entries(matrix1, row1);

            for row2 in basis.index_range(row1) {
                let Some(row) = basis.ket_index_from_tuple(row1, row2) else {
                    continue;
                };
                let (cols2, values2) = sparse::row_entries(matrix2, row2);

                for (&col1, &value1) in cols1.iter().zip(values1) {
                    let range_col2 = basis.index_range(col1);
                    let start = cols2.partition_point(|&c| c < range_col2.start);

                    for (&col2, &value2) in cols2[start..].iter().zip(&values2[start..]) {
                        if col2 >= range_col2.end {
                            break;
                        }
                        let Some(col) = basis.ket_index_from_tuple(col1, col2) else {
                            continue;
                        };

                        let value = value1 * value2;
                        if value.modulus() > precision {
                            triplets.push(Triplet::new(row, col, value));
                        }
                    }
                }
            }
            trace!(row1, entries = triplets.len(), "tensor product row");

            triplets
        })
        .collect();

    Ok(triplets)
}

fn check_shape<S: Scalar>(matrix: &SparseMatrix<S>, expected: usize) -> Result<()> {
    if matrix.nrows() != expected || matrix.ncols() != expected {
        return Err(PairError::ShapeMismatch {
            expected,
            found: (matrix.nrows(), matrix.ncols()),
        });
    }

    Ok(())
}
