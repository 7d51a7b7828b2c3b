//! Factory for the iterative solvers.
//!
//! `SolverContext` holds a solver kind together with its parameters and builds
//! the matching solver on every call to [`SolverContext::solve`]. This is how the
//! driver maps a method name onto a solver without knowing the concrete types.

use crate::config::SolverOptions;
use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use crate::error::SolverError;
use crate::solver::{CgSolver, JacobiSolver, LinearSolver, SorSolver, SsorSolver};
use crate::utils::convergence::SolveStats;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Enum representing the available solver types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Jacobi iteration
    Jacobi,
    /// Successive over-relaxation (forward sweep)
    Sor,
    /// Symmetric SOR (forward + backward sweep)
    Ssor,
    /// Conjugate Gradient (for SPD matrices)
    Cg,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] = [SolverKind::Jacobi, SolverKind::Sor, SolverKind::Ssor, SolverKind::Cg];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Jacobi => "jacobi",
            SolverKind::Sor => "sor",
            SolverKind::Ssor => "ssor",
            SolverKind::Cg => "cg",
        }
    }

    /// True for the methods that take a relaxation factor.
    pub fn uses_omega(self) -> bool {
        matches!(self, SolverKind::Sor | SolverKind::Ssor)
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SolverError::UnknownMethod(s.to_string()))
    }
}

/// Context and configuration for one solver.
#[derive(Debug, Clone)]
pub struct SolverContext<T> {
    /// The type of solver to use
    pub kind: SolverKind,
    /// Relative residual tolerance
    pub tol: T,
    /// Maximum number of iterations
    pub max_it: usize,
    /// Relaxation factor (ignored by Jacobi and CG)
    pub omega: T,
}

impl<T: Float> SolverContext<T> {
    pub fn new(kind: SolverKind, tol: T, max_it: usize, omega: T) -> Self {
        Self { kind, tol, max_it, omega }
    }

    /// Solve `A x = b` with the configured solver, starting from the current `x`.
    pub fn solve<M, V>(&self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, SolverError>
    where
        M: MatVec<V> + RowSplit<T> + Indexing + Assembled,
        V: AsRef<[T]> + AsMut<[T]> + From<Vec<T>> + Clone,
        (): InnerProduct<V, Scalar = T>,
    {
        match self.kind {
            SolverKind::Jacobi => JacobiSolver::new(self.tol, self.max_it).solve(a, b, x),
            SolverKind::Sor => SorSolver::new(self.tol, self.max_it, self.omega).solve(a, b, x),
            SolverKind::Ssor => SsorSolver::new(self.tol, self.max_it, self.omega).solve(a, b, x),
            SolverKind::Cg => CgSolver::new(self.tol, self.max_it).solve(a, b, x),
        }
    }
}

impl SolverContext<f64> {
    /// Build from options for a grid with spacing `h` (used for the default ω).
    pub fn from_options(kind: SolverKind, opts: &SolverOptions, h: f64) -> Self {
        Self::new(kind, opts.tol, opts.max_iter, opts.omega_for(h))
    }
}
