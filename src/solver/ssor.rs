use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use crate::error::SolverError;
use crate::solver::LinearSolver;
use crate::solver::sor::{sor_sweep, SweepDirection};
use crate::solver::stationary::{self, Sweep};
use crate::utils::convergence::{Convergence, SolveStats};
use num_traits::Float;

/// Symmetric Successive Over-Relaxation.
///
/// One iteration is a forward SOR sweep followed by a backward SOR sweep with the
/// same ω, so the iteration operator is symmetric for symmetric A. Convergence
/// is checked only after the full pair. As with [`SorSolver`](super::SorSolver),
/// ω is not validated.
pub struct SsorSolver<T> {
    conv: Convergence<T>,
    omega: T,
}

impl<T: Copy + Float> SsorSolver<T> {
    pub fn new(tol: T, max_iters: usize, omega: T) -> Self {
        Self { conv: Convergence { tol, max_iters }, omega }
    }
    pub fn omega(&self) -> T { self.omega }
}

impl<M, T> Sweep<M, T> for SsorSolver<T>
where
    M: RowSplit<T>,
    T: Float,
{
    const NAME: &'static str = "ssor";

    fn convergence(&self) -> &Convergence<T> {
        &self.conv
    }

    fn sweep(&self, a: &M, b: &[T], x: &mut [T], _work: &mut [T]) {
        sor_sweep(a, b, x, self.omega, SweepDirection::SYMMETRIC);
    }
}

impl<M, V, T> LinearSolver<M, V> for SsorSolver<T>
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
