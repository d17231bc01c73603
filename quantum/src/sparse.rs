use faer::sparse::{SparseRowMat, Triplet, ops};

use crate::scalar::{RealScalar, Scalar};

/// Row-major sparse operator matrix.
pub type SparseMatrix<T> = SparseRowMat<usize, T>;

pub type Entry<T> = Triplet<usize, usize, T>;

/// Compresses `triplets` into a row-major matrix, summing duplicated entries.
/// Column indices of every row are sorted ascending.
///
/// # Panics
///
/// Panics if an entry lies outside the `nrows` x `ncols` shape.
pub fn from_triplets<T: Scalar>(nrows: usize, ncols: usize, triplets: Vec<Entry<T>>) -> SparseMatrix<T> {
    SparseRowMat::try_new_from_triplets(nrows, ncols, &triplets)
        .expect("triplets must lie inside the matrix shape")
}

pub fn zeros<T: Scalar>(nrows: usize, ncols: usize) -> SparseMatrix<T> {
    from_triplets(nrows, ncols, vec![])
}

pub fn diagonal<T: Scalar>(values: &[T]) -> SparseMatrix<T> {
    let triplets = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Triplet::new(i, i, v))
        .collect();

    from_triplets(values.len(), values.len(), triplets)
}

pub fn row_entries<T>(matrix: &SparseMatrix<T>, row: usize) -> (&[usize], &[T]) {
    let matrix = matrix.as_ref();

    (matrix.col_idx_of_row_raw(row), matrix.val_of_row(row))
}

pub fn entries<T: Scalar>(matrix: &SparseMatrix<T>) -> Vec<Entry<T>> {
    let mut triplets = Vec::with_capacity(nnz(matrix));
    for row in 0..matrix.nrows() {
        let (cols, values) = row_entries(matrix, row);
        triplets.extend(
            cols.iter()
                .zip(values)
                .map(|(&col, &value)| Triplet::new(row, col, value)),
        );
    }

    triplets
}

pub fn nnz<T>(matrix: &SparseMatrix<T>) -> usize {
    (0..matrix.nrows())
        .map(|row| row_entries(matrix, row).0.len())
        .sum()
}

pub fn get<T: Scalar>(matrix: &SparseMatrix<T>, row: usize, col: usize) -> T {
    let (cols, values) = row_entries(matrix, row);

    cols.binary_search(&col)
        .map_or_else(|_| T::zero(), |index| values[index])
}

pub fn scaled<T: Scalar>(matrix: &SparseMatrix<T>, factor: T) -> SparseMatrix<T> {
    let mut scaled = matrix.clone();
    for value in scaled.val_mut() {
        *value = factor * *value;
    }

    scaled
}

/// Returns `lhs + factor * rhs`, keeping the union of both sparsity patterns.
pub fn add_scaled<T: Scalar>(
    lhs: &SparseMatrix<T>,
    factor: T,
    rhs: &SparseMatrix<T>,
) -> SparseMatrix<T> {
    let rhs = scaled(rhs, factor);

    ops::add(lhs.transpose(), rhs.transpose())
        .expect("sparse sum allocation failed")
        .into_transpose()
}

/// Symmetric permutation of a square matrix with `new(i, j) = old(p[i], p[j])`.
pub fn permuted<T: Scalar>(matrix: &SparseMatrix<T>, permutation: &[usize]) -> SparseMatrix<T> {
    assert_eq!(matrix.nrows(), matrix.ncols(), "permuted matrix must be square");
    assert_eq!(matrix.nrows(), permutation.len(), "permutation length mismatch");

    let mut inverse = vec![0; permutation.len()];
    for (new, &old) in permutation.iter().enumerate() {
        inverse[old] = new;
    }

    let triplets = entries(matrix)
        .into_iter()
        .map(|t| Triplet::new(inverse[t.row], inverse[t.col], t.val))
        .collect();

    from_triplets(matrix.nrows(), matrix.ncols(), triplets)
}

pub fn is_hermitian<T: Scalar>(matrix: &SparseMatrix<T>, tolerance: T::Real) -> bool {
    if matrix.nrows() != matrix.ncols() {
        return false;
    }

    entries(matrix).into_iter().all(|t| {
        let mirrored = get(matrix, t.col, t.row).conjugate();
        (t.val - mirrored).modulus() <= tolerance
    })
}

/// Drops stored entries with magnitude not above [`RealScalar::numerical_precision`].
pub fn pruned<T: Scalar>(matrix: &SparseMatrix<T>) -> SparseMatrix<T> {
    let precision = T::Real::numerical_precision();
    let triplets = entries(matrix)
        .into_iter()
        .filter(|t| t.val.modulus() > precision)
        .collect();

    from_triplets(matrix.nrows(), matrix.ncols(), triplets)
}

pub fn to_dense<T: Scalar>(matrix: &SparseMatrix<T>) -> Vec<Vec<T>> {
    let mut dense = vec![vec![T::zero(); matrix.ncols()]; matrix.nrows()];
    for t in entries(matrix) {
        dense[t.row][t.col] = t.val;
    }

    dense
}
