//! Matrix module: the incrementally built sparse stencil matrix.

pub mod sparse;
pub use sparse::SparseMatrix;
