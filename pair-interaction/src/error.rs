use quantum::transform::TransformError;
use thiserror::Error;

use crate::atom::OperatorType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PairError {
    #[error("two atom systems must be added before creating the pair basis, got {0}")]
    WrongNumberOfSystems(usize),
    #[error("the atom system must be diagonalized before it can be added")]
    NotDiagonal,
    #[error("invalid {quantity} window: min {min} is larger than max {max}")]
    MalformedWindow {
        quantity: &'static str,
        min: f64,
        max: f64,
    },
    #[error("the quantum number {0} must not be restricted because it is not well-defined")]
    UndefinedQuantumNumber(&'static str),
    #[error("the multipole order must be 3, 4, or 5, got {0}")]
    InvalidOrder(i32),
    #[error("the distance must be greater than zero")]
    ZeroDistance,
    #[error("the distance vector must not have a y-component if the scalar type is real")]
    TransverseComponent,
    #[error("operator {operator:?} with q = {q} is not available")]
    MissingOperator { operator: OperatorType, q: i32 },
    #[error("operator matrix of shape {found:?} does not match {expected} states")]
    ShapeMismatch {
        expected: usize,
        found: (usize, usize),
    },
    #[error("numerical invariant violated: {0}")]
    Numerical(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub type Result<T> = std::result::Result<T, PairError>;
