use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    scalar::{RealScalar, Scalar},
    sparse::SparseMatrix,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformationType {
    SortByEnergy,
    SortByQuantumNumberF,
    SortByQuantumNumberM,
    SortByParity,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("cannot use {0:?} because the label is not well-defined for every state")]
    UndefinedLabel(TransformationType),
    #[error("sorting of length {found} does not match {expected} states")]
    SizeMismatch { expected: usize, found: usize },
}

/// Permutation of states, `permutation[new] = old`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorting {
    permutation: Vec<usize>,
    labels: Vec<TransformationType>,
}

impl Sorting {
    pub fn identity(size: usize) -> Self {
        Self {
            permutation: (0..size).collect(),
            labels: vec![],
        }
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn labels(&self) -> &[TransformationType] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    pub fn check_size(&self, expected: usize) -> Result<(), TransformError> {
        if self.len() != expected {
            return Err(TransformError::SizeMismatch {
                expected,
                found: self.len(),
            });
        }

        Ok(())
    }
}

/// Start indices of blocks of states sharing all label values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blocks {
    starts: Vec<usize>,
}

impl Blocks {
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Stable lexicographic sort of states by the given per-label keys.
pub fn sorter_from_keys<R: RealScalar>(
    size: usize,
    keys: &[Vec<R>],
    labels: &[TransformationType],
) -> Sorting {
    let mut permutation: Vec<usize> = (0..size).collect();
    permutation.sort_by(|&i, &j| {
        keys.iter()
            .map(|k| k[i].partial_cmp(&k[j]).unwrap_or(Ordering::Equal))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    Sorting {
        permutation,
        labels: labels.to_vec(),
    }
}

pub fn blocks_from_keys<R: RealScalar>(size: usize, keys: &[Vec<R>]) -> Blocks {
    let precision = R::numerical_precision();
    let starts = (0..size)
        .filter(|&i| i == 0 || keys.iter().any(|k| (k[i] - k[i - 1]).abs() > precision))
        .collect();

    Blocks { starts }
}

/// Objects backed by an operator matrix whose states can be sorted by conserved labels.
pub trait Transformable<S: Scalar> {
    fn matrix(&self) -> &SparseMatrix<S>;

    /// Values of `label` for every state in current order.
    fn sort_keys(&self, label: TransformationType) -> Result<Vec<S::Real>, TransformError>;

    /// Permutes states according to `sorting`.
    fn sort(&mut self, sorting: &Sorting) -> Result<(), TransformError>;

    fn get_sorter(&self, labels: &[TransformationType]) -> Result<Sorting, TransformError> {
        let keys = labels
            .iter()
            .map(|&l| self.sort_keys(l))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sorter_from_keys(self.matrix().nrows(), &keys, labels))
    }

    /// Blocks of the current order, meaningful once sorted by `labels`.
    fn get_blocks(&self, labels: &[TransformationType]) -> Result<Blocks, TransformError> {
        let keys = labels
            .iter()
            .map(|&l| self.sort_keys(l))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blocks_from_keys(self.matrix().nrows(), &keys))
    }
}
