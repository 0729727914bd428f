mod crout;
mod traits;

pub use crout::{solve, Crout, RefinementConfig};
pub use traits::LSolver;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Every coefficient in a row is zero (or below the pivot tolerance).
    #[error("The matrix is singular: row {row} has no non-zero coefficient")]
    Singular { row: usize },

    #[error("The matrix is ill conditioned: {cause}")]
    IllConditioned { cause: Conditioning },
}

/// Why a system was classified as ill conditioned.
#[derive(Debug, Error, PartialEq)]
pub enum Conditioning {
    /// The largest scaled pivot candidate in this column was zero during the LU factorization.
    #[error("zero pivot in column {col}")]
    ZeroPivot { col: usize },

    /// The first refinement correction was larger than half of the solution norm, so the
    /// factorization cannot be trusted.
    #[error("the first correction is too large relative to the solution")]
    InaccurateDecomposition,

    /// Iterative refinement did not reach the convergence ratio.
    #[error("no convergence after {iterations} refinement iterations")]
    NoConvergence { iterations: usize },
}
