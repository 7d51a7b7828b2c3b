//! Solver configuration.

pub mod options;
pub use options::{optimal_omega, SolverOptions, DEFAULT_MAX_ITER, DEFAULT_TOL};
