//! Sparse associative containers that answer every lookup.
//!
//! Absent keys read back as the container's default value and reading never inserts. These
//! back the coefficient matrix, the right-hand side and the variable index map of an equation
//! system.
mod array;
mod matrix;

pub use array::SparseArray;
pub use matrix::SparseMatrix;
