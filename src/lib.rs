//! fdsolve: sparse stencil matrices and iterative solvers for finite-difference problems
//!
//! This crate provides an incrementally assembled sparse matrix and four iterative solvers
//! (Jacobi, SOR, SSOR and unpreconditioned conjugate gradient) sharing one solve contract,
//! plus the Poisson model problem on structured 2D grids that they are typically applied to.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod problem;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use matrix::*;
pub use problem::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
