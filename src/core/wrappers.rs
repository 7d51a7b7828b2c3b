//! Trait implementations for `faer` dense matrices and `Vec<T>`.
//!
//! With these, a small `faer::Mat` can be handed to any solver in place of a
//! [`SparseMatrix`](crate::matrix::SparseMatrix), which is how reference results
//! are produced in the tests. `Vec<T>` is the dense vector type throughout the
//! crate; its inner products are provided by the unit type `()`.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{Assembled, Indexing, InnerProduct, MatVec, RowSplit};
use faer::Mat;
use num_traits::Float;

/// `y = A x`, assembled row by row from the same diagonal / off-diagonal split
/// the relaxation sweeps use, so dense and sparse operators agree term by term.
///
/// # Panics
/// If the matrix is not square or a length does not match.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), self.ncols(), "matrix is not square");
        assert_eq!(self.ncols(), x.len(), "x has length {}, expected {}", x.len(), self.ncols());
        assert_eq!(self.nrows(), y.len(), "y has length {}, expected {}", y.len(), self.nrows());
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = RowSplit::diagonal(self, i) * x[i] + self.off_diag_dot(i, x);
        }
    }
}

/// Row splitting for a dense matrix: every column other than `i` is off-diagonal.
impl<T: Float> RowSplit<T> for Mat<T> {
    fn diagonal(&self, i: usize) -> T {
        self[(i, i)]
    }

    fn off_diag_dot(&self, i: usize, x: &[T]) -> T {
        let mut sum = T::zero();
        for j in 0..self.ncols() {
            if j != i {
                sum = sum + self[(i, j)] * x[j];
            }
        }
        sum
    }
}

/// A dense matrix has no build phase.
impl<T> Assembled for Mat<T> {
    fn is_assembled(&self) -> bool {
        true
    }
}

/// Implements inner product and norm for vectors.
impl<T: Float> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        x.iter()
            .zip(y.iter())
            .map(|(xi, yi)| *xi * *yi)
            .fold(T::zero(), |acc, v| acc + v)
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        x.iter()
            .map(|xi| *xi * *xi)
            .fold(T::zero(), |acc, v| acc + v)
            .sqrt()
    }
}

/// Implements the `Indexing` trait for `Vec<T>`, treating a vector as a column vector.
impl<T> Indexing for Vec<T> {
    /// Returns the number of rows (length) of the vector.
    fn nrows(&self) -> usize {
        self.len()
    }
}

/// Implements the `Indexing` trait for `faer::Mat`, returning the number of rows.
impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}
