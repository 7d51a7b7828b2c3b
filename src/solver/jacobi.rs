//! Jacobi iteration.
//!
//! Every unknown is updated from the previous iterate only:
//! `x_i ← (b_i - Σ_{j≠i} a_ij x_j^old) / a_ii`. The old iterate is copied into
//! the solve's scratch vector before each sweep.

use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use crate::error::SolverError;
use crate::solver::LinearSolver;
use crate::solver::stationary::{self, Sweep};
use crate::utils::convergence::{Convergence, SolveStats};
use num_traits::Float;

pub struct JacobiSolver<T> {
    conv: Convergence<T>,
}

impl<T: Copy + Float> JacobiSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence { tol, max_iters } }
    }
}

impl<M, T> Sweep<M, T> for JacobiSolver<T>
where
    M: RowSplit<T>,
    T: Float,
{
    const NAME: &'static str = "jacobi";

    fn convergence(&self) -> &Convergence<T> {
        &self.conv
    }

    fn sweep(&self, a: &M, b: &[T], x: &mut [T], work: &mut [T]) {
        work.copy_from_slice(x);
        for (i, xi) in x.iter_mut().enumerate() {
            *xi = (b[i] - a.off_diag_dot(i, work)) / a.diagonal(i);
        }
    }
}

impl<M, V, T> LinearSolver<M, V> for JacobiSolver<T>
where
    M: MatVec<V> + RowSplit<T> + Indexing + Assembled,
    V: AsRef<[T]> + AsMut<[T]> + From<Vec<T>>,
    (): InnerProduct<V, Scalar = T>,
    T: Float,
{
    type Error = SolverError;
    type Scalar = T;

    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, SolverError> {
        stationary::iterate(&*self, a, b, x)
    }
}
