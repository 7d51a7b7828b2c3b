//! Conjugate Gradient (unpreconditioned) per Saad §6.1.
//!
//! The matrix must be symmetric positive definite. This is not checked: on an
//! indefinite or non-symmetric operator the recurrence can stall or produce
//! meaningless iterates, and `p·Ap` may vanish. In exact arithmetic an `n x n`
//! SPD system converges in at most `n` iterations.

use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec};
use crate::error::SolverError;
use crate::solver::{LinearSolver, as_f64, check_system, log_outcome, log_start, residual};
use crate::utils::convergence::{Convergence, SolveStats};
use tracing::trace;

pub struct CgSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Copy + num_traits::Float> CgSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence { tol, max_iters } }
    }
}

impl<M, V, T> LinearSolver<M, V> for CgSolver<T>
where
    M: MatVec<V> + Indexing + Assembled,
    (): InnerProduct<V, Scalar = T>,
    V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    T: num_traits::Float,
{
    type Error = SolverError;
    type Scalar = T;

    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, SolverError> {
        let n = check_system(a, b.as_ref(), x.as_ref())?;
        let ip = ();

        // r = b - A x, p = r; ap holds A p
        let mut r = V::from(vec![T::zero(); n]);
        residual(a, b, x, &mut r);
        let mut p = r.clone();
        let mut ap = V::from(vec![T::zero(); n]);

        let mut rsq = ip.dot(&r, &r);
        let res0 = rsq.sqrt();
        log_start("cg", n, self.conv.tol, self.conv.max_iters, res0);
        let mut stats = SolveStats {
            iterations: 0,
            final_residual: res0,
            converged: self.conv.is_converged(res0, res0),
        };
        if stats.converged {
            log_outcome("cg", &stats);
            return Ok(stats);
        }

        for i in 1..=self.conv.max_iters {
            a.matvec(&p, &mut ap);
            let alpha = rsq / ip.dot(&p, &ap);
            for (xj, pj) in x.as_mut().iter_mut().zip(p.as_ref()) {
                *xj = *xj + alpha * *pj;
            }
            for (rj, apj) in r.as_mut().iter_mut().zip(ap.as_ref()) {
                *rj = *rj - alpha * *apj;
            }
            let rsq_new = ip.dot(&r, &r);
            let res_norm = rsq_new.sqrt();
            trace!(method = "cg", iteration = i, residual = as_f64(res_norm));
            let (stop, s) = self.conv.check(res_norm, res0, i);
            stats = s;
            if stop {
                break;
            }
            let beta = rsq_new / rsq;
            for (pj, rj) in p.as_mut().iter_mut().zip(r.as_ref()) {
                *pj = *rj + beta * *pj;
            }
            rsq = rsq_new;
        }
        log_outcome("cg", &stats);
        Ok(stats)
    }
}
