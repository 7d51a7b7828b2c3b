//! Convergence tracking & tolerance checks for iterative solvers.
//!
//! All solvers measure progress as ‖r_k‖₂ / ‖r₀‖₂, the residual norm relative to
//! the residual of the initial guess.

/// Stopping criteria & stats.
#[derive(Clone, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// True when `res_norm` is within tolerance of `res0_norm`.
    ///
    /// A zero initial residual counts as converged.
    pub fn is_converged(&self, res_norm: T, res0_norm: T) -> bool {
        if res0_norm == T::zero() {
            return true;
        }
        res_norm / res0_norm <= self.tol
    }

    /// Returns (should_stop, stats) given current `res_norm` and iteration `i`.
    ///
    /// Exhausting `max_iters` stops the iteration but is not convergence.
    pub fn check(
        &self,
        res_norm: T,
        res0_norm: T,
        i: usize,
    ) -> (bool, SolveStats<T>) {
        let converged = self.is_converged(res_norm, res0_norm);
        (
            converged || i >= self.max_iters,
            SolveStats {
                iterations: i,
                final_residual: res_norm,
                converged,
            },
        )
    }
}
