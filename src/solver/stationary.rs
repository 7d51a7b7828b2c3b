//! Outer loop shared by the stationary relaxation methods.
//!
//! A method only decides how one sweep updates the iterate. The loop owns the
//! residual bookkeeping: after every sweep it forms r = b - A x and stops once
//! ‖r‖₂ ≤ tol · ‖r₀‖₂ or the iteration cap is hit.

use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use crate::error::SolverError;
use crate::solver::{check_system, log_outcome, log_start, residual, as_f64};
use crate::utils::convergence::{Convergence, SolveStats};
use num_traits::Float;
use tracing::trace;

/// One iteration of a stationary method.
pub trait Sweep<M, T> {
    /// Method name used in log events.
    const NAME: &'static str;

    /// Stopping criteria owned by the solver.
    fn convergence(&self) -> &Convergence<T>;

    /// Update `x` in place by one iteration.
    ///
    /// `work` is scratch space of length `x.len()`, owned by the current solve.
    fn sweep(&self, a: &M, b: &[T], x: &mut [T], work: &mut [T]);
}

/// Run `method` until convergence or until its iteration cap.
///
/// Every diagonal entry must be non-zero; the first zero found is reported as
/// [`SolverError::ZeroPivot`] before any sweep is made.
pub fn iterate<S, M, V, T>(method: &S, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, SolverError>
where
    S: Sweep<M, T>,
    M: MatVec<V> + RowSplit<T> + Indexing + Assembled,
    V: AsRef<[T]> + AsMut<[T]> + From<Vec<T>>,
    (): InnerProduct<V, Scalar = T>,
    T: Float,
{
    let n = check_system(a, b.as_ref(), x.as_ref())?;
    if let Some(i) = (0..n).find(|&i| a.diagonal(i) == T::zero()) {
        return Err(SolverError::ZeroPivot(i));
    }
    let name = <S as Sweep<M, T>>::NAME;
    let conv = method.convergence();
    let ip = ();

    let mut r = V::from(vec![T::zero(); n]);
    residual(a, b, x, &mut r);
    let res0 = ip.norm(&r);
    log_start(name, n, conv.tol, conv.max_iters, res0);

    let mut stats = SolveStats {
        iterations: 0,
        final_residual: res0,
        converged: conv.is_converged(res0, res0),
    };
    if stats.converged {
        log_outcome(name, &stats);
        return Ok(stats);
    }

    let mut work = vec![T::zero(); n];
    for k in 1..=conv.max_iters {
        method.sweep(a, b.as_ref(), x.as_mut(), &mut work);
        residual(a, b, x, &mut r);
        let res_norm = ip.norm(&r);
        trace!(method = name, iteration = k, residual = as_f64(res_norm));
        let (stop, s) = conv.check(res_norm, res0, k);
        stats = s;
        if stop {
            break;
        }
    }
    log_outcome(name, &stats);
    Ok(stats)
}
