//! Shared utilities for the solvers.

pub mod convergence;
pub use convergence::{Convergence, SolveStats};
