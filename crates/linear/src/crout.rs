//! Direct solver for square linear systems: Crout LU decomposition with implicit row scaling and
//! partial pivoting, followed by iterative refinement of the solution against the original
//! matrix.
//!
use log::{trace, warn};
use nalgebra::{DMatrix, DVector, RealField};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};
use sparse::{SparseArray, SparseMatrix};

use crate::{Conditioning, Error, LSolver};

/// Tuning for the factorization checks and the refinement loop.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefinementConfig {
    /// Refinement stops once `|correction|_inf / |x|_inf` drops below this ratio.
    pub convergence_ratio: f64,
    /// A first correction ratio above this marks the decomposition as untrustworthy.
    pub ill_conditioned_ratio: f64,
    /// Upper bound on refinement iterations.
    pub max_iterations: usize,
    /// Row maxima and scaled pivots at or below this value are rejected. `0.0` only rejects
    /// exact zeros.
    pub pivot_tolerance: f64,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        RefinementConfig {
            convergence_ratio: 5.69e-14,
            ill_conditioned_ratio: 0.5,
            max_iterations: 200,
            pivot_tolerance: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Crout<T>
where
    T: RealField + Copy,
{
    config: RefinementConfig,
    /// L (with its diagonal) in the lower triangle, unit-diagonal U strictly above it
    lu: DMatrix<T>,
    /// `pivots[r]` is the row swapped into position `r` at elimination step `r`
    pivots: DVector<usize>,
    /// iterations performed by the last `solve`
    niters: usize,
    /// final correction / solution ratio of the last `solve`
    res_norm: T,
}

impl<T> Crout<T>
where
    T: RealField + Copy,
{
    /// Creates a new solver. [`LSolver::setup`] has to be called before solving.
    pub fn new(config: RefinementConfig) -> Self {
        Crout {
            config,
            lu: DMatrix::zeros(0, 0),
            pivots: DVector::zeros(0),
            niters: 0,
            res_norm: T::zero(),
        }
    }

    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// The dimension of the last factored system.
    pub fn dim(&self) -> usize {
        self.pivots.len()
    }
}

impl<T> Default for Crout<T>
where
    T: RealField + Copy,
{
    fn default() -> Self {
        Crout::new(RefinementConfig::default())
    }
}

impl<T> LSolver<T> for Crout<T>
where
    T: RealField + Copy,
{
    fn setup(&mut self, n: usize, mat_a: &SparseMatrix<usize, usize, T>) -> Result<(), Error> {
        let tol: T = nalgebra::convert(self.config.pivot_tolerance);

        let mut lu = to_dense(n, mat_a);
        let mut scale = row_scale(&lu, tol)?;
        let mut pivots = DVector::zeros(n);

        crout_get_rf(&mut lu, &mut scale, &mut pivots, tol)?;

        self.lu = lu;
        self.pivots = pivots;
        Ok(())
    }

    fn solve(
        &mut self,
        mat_a: &SparseMatrix<usize, usize, T>,
        b: &SparseArray<usize, T>,
    ) -> Result<SparseArray<usize, T>, Error> {
        let n = self.dim();
        let convergence: T = nalgebra::convert(self.config.convergence_ratio);
        let ill_conditioned: T = nalgebra::convert(self.config.ill_conditioned_ratio);

        self.niters = 0;
        self.res_norm = T::zero();

        let mat_a = to_dense(n, mat_a);
        let b = DVector::from_fn(n, |i, _| b.get(&i));

        let mut x = DVector::<T>::zeros(n);
        // holds the residual on entry to each iteration and the correction after substitution
        let mut r = b.clone();

        let mut iteration = 0;
        loop {
            crout_get_rs(&self.lu, &self.pivots, &mut r);

            let norm_x = norm_max(&x);
            let norm_e = norm_max(&r);

            // there is no previous solution to compare the first correction against
            let mut converged = false;
            if iteration != 0 {
                let ratio = norm_e / norm_x;
                trace!(
                    "refinement iteration={}, |x|={:?}, |e|={:?}, ratio={:?}",
                    iteration,
                    norm_x,
                    norm_e,
                    ratio
                );

                if iteration == 1 && ratio > ill_conditioned {
                    warn!("First refinement correction exceeds the ill-conditioning ratio");
                    return Err(Error::IllConditioned {
                        cause: Conditioning::InaccurateDecomposition,
                    });
                }

                // 0/0 (an exactly zero solution) counts as converged
                converged = !(ratio >= convergence);
                self.res_norm = ratio;
            }

            x += &r;

            // recompute the residual against the original matrix
            r.copy_from(&b);
            r.gemv(-T::one(), &mat_a, &x, T::one());

            iteration += 1;
            self.niters = iteration;

            if converged || n == 0 {
                break;
            }

            if iteration > self.config.max_iterations {
                warn!(
                    "Iterative refinement did not converge after {} iterations",
                    self.config.max_iterations
                );
                return Err(Error::IllConditioned {
                    cause: Conditioning::NoConvergence {
                        iterations: self.config.max_iterations,
                    },
                });
            }
        }

        let mut solution = SparseArray::new(T::zero());
        for (i, &xi) in x.iter().enumerate() {
            solution.set(i, xi);
        }
        Ok(solution)
    }

    fn num_iters(&self) -> usize {
        self.niters
    }

    fn res_norm(&self) -> T {
        self.res_norm
    }
}

/// Solves the `n` by `n` system `A x = b` with the default [`RefinementConfig`].
pub fn solve<T>(
    n: usize,
    mat_a: &SparseMatrix<usize, usize, T>,
    b: &SparseArray<usize, T>,
) -> Result<SparseArray<usize, T>, Error>
where
    T: RealField + Copy,
{
    let mut crout = Crout::default();
    crout.setup(n, mat_a)?;
    crout.solve(mat_a, b)
}

/// Copies the leading `n` by `n` block of a sparse matrix into a dense one.
fn to_dense<T>(n: usize, mat_a: &SparseMatrix<usize, usize, T>) -> DMatrix<T>
where
    T: RealField + Copy,
{
    DMatrix::from_fn(n, n, |i, j| mat_a.get(i, j))
}

fn norm_max<T>(v: &DVector<T>) -> T
where
    T: RealField + Copy,
{
    v.iter()
        .map(|e| e.abs())
        .fold(T::zero(), |acc, e| if e > acc { e } else { acc })
}

/// Computes the implicit scaling factor of each row: its largest absolute coefficient.
///
/// Returns `Error::Singular` for the first row whose maximum does not exceed `tol`.
fn row_scale<T>(mat_a: &DMatrix<T>, tol: T) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    let mut scale = DVector::zeros(mat_a.nrows());
    for (i, row) in mat_a.row_iter().enumerate() {
        let max = row
            .iter()
            .map(|e| e.abs())
            .fold(T::zero(), |acc, e| if e > acc { e } else { acc });

        if max <= tol {
            return Err(Error::Singular { row: i });
        }
        scale[i] = max;
    }
    Ok(scale)
}

/// Performs the Crout LU factorization of the N by N matrix A in place.
///
/// At step r the r'th column of L is computed for rows r..N and the row with the largest value
/// relative to its scaling factor is chosen as the pivot. That row is swapped into position r
/// and the r'th row of U is computed.
///
/// A successful factorization leaves the matrix A and the pivot array p with the following
/// information:
///
/// 1. p[r] contains the row number of the pivot row chosen at step r, r=0, 1, ..., N-1.
///
/// 2. If the factorization of A is given by PA = LU, where P is a permutation matrix, L is a lower
///    triangular matrix and U is a unit upper triangular matrix, then the lower triangular part
///    of A (including its diagonal) contains L and the strictly upper triangular part contains U.
///
/// `scale` must hold the row scaling factors of A. It is permuted along with the rows.
///
/// Returns `Error::IllConditioned` if the largest scaled pivot candidate of some column does not
/// exceed `tol`.
fn crout_get_rf<T>(
    mat_a: &mut DMatrix<T>,
    scale: &mut DVector<T>,
    pivot: &mut DVector<usize>,
    tol: T,
) -> Result<(), Error>
where
    T: RealField + Copy,
{
    let n = mat_a.ncols();

    for r in 0..n {
        let mut max = T::zero();
        let mut l = r;

        // r'th column of L, rows r..n
        for i in r..n {
            let mut temp = mat_a[(i, r)];
            for j in 0..r {
                temp -= mat_a[(i, j)] * mat_a[(j, r)];
            }
            mat_a[(i, r)] = temp;

            let test = (temp / scale[i]).abs();
            if test > max {
                max = test;
                l = i;
            }
        }

        if max <= tol {
            return Err(Error::IllConditioned {
                cause: Conditioning::ZeroPivot { col: r },
            });
        }

        // row r is finished, so row l inherits its scale
        scale[l] = scale[r];
        pivot[r] = l;

        if l != r {
            mat_a.swap_rows(r, l);
        }

        // r'th row of U, columns r+1..n
        for i in (r + 1)..n {
            let mut temp = mat_a[(r, i)];
            for j in 0..r {
                temp -= mat_a[(r, j)] * mat_a[(j, i)];
            }
            mat_a[(r, i)] = temp / mat_a[(r, r)];
        }
    }

    Ok(())
}

/// `crout_get_rs` solves A x = b using the factorization in A and the pivot information in p
/// computed in `crout_get_rf`. The solution x is returned in b. This routine cannot fail if the
/// corresponding call to `crout_get_rf` did not fail.
fn crout_get_rs<T>(mat_a: &DMatrix<T>, pivot: &DVector<usize>, b: &mut DVector<T>)
where
    T: RealField + Copy,
{
    let n = mat_a.ncols();

    // Solve Ly = Pb, applying the row interchanges as we go
    for i in 0..n {
        let p = pivot[i];
        let mut temp = b[p];
        b[p] = b[i];
        for j in 0..i {
            temp -= mat_a[(i, j)] * b[j];
        }
        b[i] = temp / mat_a[(i, i)];
    }

    // Solve Ux = y, U has a unit diagonal
    for i in (0..n).rev() {
        let mut temp = b[i];
        for j in (i + 1)..n {
            temp -= mat_a[(i, j)] * b[j];
        }
        b[i] = temp;
    }
}
