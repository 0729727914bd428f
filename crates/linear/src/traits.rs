use nalgebra::Scalar;
use num_traits::Zero;
use sparse::{SparseArray, SparseMatrix};

use crate::Error;

pub trait LSolver<T>
where
    T: Scalar + Zero,
{
    /// Performs any linear solver setup needed for the leading `n` by `n` block of `mat_a`, e.g.
    /// the LU factorization for a direct solver. `mat_a` itself is left untouched.
    fn setup(&mut self, n: usize, mat_a: &SparseMatrix<usize, usize, T>) -> Result<(), Error>;

    /// solves a linear system Ax = b.
    ///
    /// ## Arguments
    /// * `mat_a` the original (unfactored) matrix A, the same one passed to `setup`.
    /// * `b` the linear system right-hand side.
    ///
    /// ## Notes
    /// The returned vector holds an entry for every index in `0..n`, including zeros.
    fn solve(
        &mut self,
        mat_a: &SparseMatrix<usize, usize, T>,
        b: &SparseArray<usize, T>,
    ) -> Result<SparseArray<usize, T>, Error>;

    /// should return the number of linear iterations performed in the last ‘solve’ call.
    fn num_iters(&self) -> usize {
        0
    }

    /// should return the final residual norm from the last ‘solve’ call.
    fn res_norm(&self) -> T {
        T::zero()
    }
}
