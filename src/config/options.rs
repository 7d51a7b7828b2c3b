//! Command-line or API options for the iterative solvers.
//!
//! This module provides the `SolverOptions` struct, which carries the stopping
//! criteria and the relaxation factor handed to a solver at construction. When
//! no ω is given, SOR and SSOR use the optimal value for the 5-point Laplacian
//! on the grid spacing in use.

use std::f64::consts::PI;

/// Convergence tolerance used when none is given.
pub const DEFAULT_TOL: f64 = 1.0e-6;

/// Iteration cap used when none is given.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Relative residual tolerance ‖r‖/‖r₀‖
    pub tol: f64,

    /// Maximum number of iterations
    pub max_iter: usize,

    /// Relaxation factor ω for SOR/SSOR; `None` selects [`optimal_omega`]
    pub omega: Option<f64>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { tol: DEFAULT_TOL, max_iter: DEFAULT_MAX_ITER, omega: None }
    }
}

impl SolverOptions {
    /// ω to use on a grid with spacing `h`.
    pub fn omega_for(&self, h: f64) -> f64 {
        self.omega.unwrap_or_else(|| optimal_omega(h))
    }
}

/// Optimal SOR factor for the model Poisson problem, ω = 2 / (1 + sin(π h)).
pub fn optimal_omega(h: f64) -> f64 {
    2.0 / (1.0 + (PI * h).sin())
}
