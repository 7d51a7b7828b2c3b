//! Context module for fdsolve.
//!
//! This module provides the factory type that selects a solver by name and
//! constructs it from configuration.
//!
//! Modules:
//! - [`solver_context`]: Contains the `SolverKind` enum and the `SolverContext` factory.
//!
//! # Example
//! ```rust
//! use fdsolve::{SolverContext, SolverKind, SparseMatrix};
//!
//! let mut a = SparseMatrix::new(2);
//! a.set(0, 0, 2.0).unwrap();
//! a.set(0, 1, -1.0).unwrap();
//! a.set(1, 1, 2.0).unwrap();
//! a.set(1, 0, -1.0).unwrap();
//! a.close();
//!
//! let ctx = SolverContext::new("cg".parse::<SolverKind>().unwrap(), 1e-10, 10, 1.0);
//! let mut x = vec![0.0; 2];
//! let stats = ctx.solve(&a, &vec![1.0, 1.0], &mut x).unwrap();
//! assert!(stats.converged);
//! ```
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems. SIAM.

pub mod solver_context;
pub use solver_context::{SolverContext, SolverKind};
