//! Core traits and their implementations for the vector and dense matrix types.

pub mod traits;
pub mod wrappers;

pub use traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
