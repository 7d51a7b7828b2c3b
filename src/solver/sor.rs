use bitflags::bitflags;
use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use crate::error::SolverError;
use crate::solver::LinearSolver;
use crate::solver::stationary::{self, Sweep};
use crate::utils::convergence::{Convergence, SolveStats};
use num_traits::Float;
use std::fmt;

bitflags! {
    /// Order in which a relaxation sweep visits the unknowns.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SweepDirection: u32 {
        const FORWARD   = 0b01; // increasing index (Gauss–Seidel order)
        const BACKWARD  = 0b10;
        const SYMMETRIC = Self::FORWARD.bits() | Self::BACKWARD.bits();
    }
}

/// Relax unknown `i` in place: x_i ← (1-ω) x_i + ω (b_i - Σ_{j≠i} a_ij x_j) / a_ii.
#[inline]
fn relax_row<M, T>(a: &M, b: &[T], x: &mut [T], omega: T, i: usize)
where
    M: RowSplit<T>,
    T: Float,
{
    let gs = (b[i] - a.off_diag_dot(i, x)) / a.diagonal(i);
    x[i] = (T::one() - omega) * x[i] + omega * gs;
}

/// One SOR sweep in the given direction(s). A symmetric sweep runs forward, then backward.
pub(crate) fn sor_sweep<M, T>(a: &M, b: &[T], x: &mut [T], omega: T, dir: SweepDirection)
where
    M: RowSplit<T>,
    T: Float,
{
    let n = x.len();
    if dir.contains(SweepDirection::FORWARD) {
        for i in 0..n {
            relax_row(a, b, x, omega, i);
        }
    }
    if dir.contains(SweepDirection::BACKWARD) {
        for i in (0..n).rev() {
            relax_row(a, b, x, omega, i);
        }
    }
}

/// Successive over-relaxation.
///
/// ω is not checked. The iteration converges for SPD matrices when
/// 0 < ω < 2; any other value is the caller's responsibility and may diverge
/// without an error. ω = 1 is plain Gauss–Seidel.
pub struct SorSolver<T> {
    conv: Convergence<T>,
    omega: T,
    dir: SweepDirection,
}

impl<T: Copy + Float> SorSolver<T> {
    pub fn new(tol: T, max_iters: usize, omega: T) -> Self {
        Self { conv: Convergence { tol, max_iters }, omega, dir: SweepDirection::FORWARD }
    }
    pub fn with_direction(mut self, dir: SweepDirection) -> Self {
        self.dir = dir;
        self
    }
    pub fn omega(&self) -> T { self.omega }
    pub fn direction(&self) -> SweepDirection { self.dir }
}

impl<T> fmt::Display for SorSolver<T>
where
    T: Float + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOR(omega={}, tol={}, max_iters={}, dir={:?})",
            self.omega, self.conv.tol, self.conv.max_iters, self.dir)
    }
}

impl<M, T> Sweep<M, T> for SorSolver<T>
where
    M: RowSplit<T>,
    T: Float,
{
    const NAME: &'static str = "sor";

    fn convergence(&self) -> &Convergence<T> {
        &self.conv
    }

    fn sweep(&self, a: &M, b: &[T], x: &mut [T], _work: &mut [T]) {
        sor_sweep(a, b, x, self.omega, self.dir);
    }
}

impl<M, V, T> LinearSolver<M, V> for SorSolver<T>
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
