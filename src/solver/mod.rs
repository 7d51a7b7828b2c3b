//! Iterative solver interfaces.
//!
//! Every solver implements [`LinearSolver`]. Jacobi, SOR and SSOR only supply a
//! per-iteration [`Sweep`](stationary::Sweep) and share the loop in
//! [`stationary::iterate`]; CG runs its own recurrence.
//!
//! Running out of iterations is not an error: the returned
//! [`SolveStats`] then has `iterations == max_iters` and `converged == false`,
//! and `x` holds the last iterate. `Err` is reserved for misuse (open matrix,
//! length mismatch, zero diagonal).

use crate::core::traits::{Assembled, Indexing, MatVec};
use crate::error::SolverError;
use crate::utils::convergence::SolveStats;
use num_traits::Float;
use tracing::{debug, warn};

/// Common interface for the iterative solvers.
pub trait LinearSolver<M, V> {
    type Error;
    /// Solve A·x = b, writing result into `x`.
    /// Returns iteration stats (including convergence info).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V
    ) -> Result<SolveStats<<Self as LinearSolver<M, V>>::Scalar>, Self::Error>;
    type Scalar: Copy + PartialOrd;
}

pub mod stationary;

pub mod jacobi;
pub use jacobi::JacobiSolver;

pub mod sor;
pub use sor::{SorSolver, SweepDirection};

pub mod ssor;
pub use ssor::SsorSolver;

pub mod cg;
pub use cg::CgSolver;

/// Check that `a` is finalized and that `b` and `x` match its dimension.
pub(crate) fn check_system<M, T>(a: &M, b: &[T], x: &[T]) -> Result<usize, SolverError>
where
    M: Indexing + Assembled,
{
    if !a.is_assembled() {
        return Err(SolverError::NotFinalized);
    }
    let n = a.nrows();
    for len in [b.len(), x.len()] {
        if len != n {
            return Err(SolverError::DimensionMismatch { expected: n, found: len });
        }
    }
    Ok(n)
}

/// r ← b - A x
pub(crate) fn residual<M, V, T>(a: &M, b: &V, x: &V, r: &mut V)
where
    M: MatVec<V>,
    V: AsRef<[T]> + AsMut<[T]>,
    T: Float,
{
    a.matvec(x, r);
    for (ri, bi) in r.as_mut().iter_mut().zip(b.as_ref()) {
        *ri = *bi - *ri;
    }
}

pub(crate) fn as_f64<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

pub(crate) fn log_start<T: Float>(method: &'static str, n: usize, tol: T, max_iters: usize, res0: T) {
    debug!(method, n, tol = as_f64(tol), max_iters, initial_residual = as_f64(res0), "starting solve");
}

pub(crate) fn log_outcome<T: Float>(method: &'static str, stats: &SolveStats<T>) {
    if stats.converged {
        debug!(
            method,
            iterations = stats.iterations,
            residual = as_f64(stats.final_residual),
            "converged"
        );
    } else {
        warn!(
            method,
            iterations = stats.iterations,
            residual = as_f64(stats.final_residual),
            "iteration limit reached before convergence"
        );
    }
}
