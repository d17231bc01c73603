//! Interaction of two Rydberg atoms.
//!
//! A [`basis_pair::BasisPairCreator`] combines the eigenstates of two
//! diagonalized single-atom systems into an energetically restricted product
//! basis. [`system_pair::SystemPair`] assembles the multipole interaction
//! Hamiltonian on that basis from the Green's function tensors of the
//! separation vector and sparse tensor products of single-atom operators.

pub mod atom;
pub mod basis_pair;
pub mod config;
pub mod error;
pub mod green_functions;
pub mod ket;
pub mod operator_pair;
pub mod spherical;
pub mod system_pair;
pub mod tensor_product;
pub mod window;

#[cfg(test)]
mod test_systems;
