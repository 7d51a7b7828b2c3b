//! Model problem setup and solution output.
//!
//! These pieces sit on top of the solver core: they assemble a
//! [`SparseMatrix`](crate::matrix::SparseMatrix) and right-hand side for the
//! Poisson equation on a [`Grid2D`], and write the resulting field to disk.

pub mod grid;
pub mod output;
pub mod poisson;

pub use grid::Grid2D;
pub use output::{write_field, write_solution};
pub use poisson::{LinearSystem, PoissonProblem};
