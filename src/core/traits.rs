//! Core linear-algebra traits for fdsolve.

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors (dense or sparse).
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}

/// Splitting of each row into its diagonal and off-diagonal part, A = D + (L + U).
///
/// Every relaxation sweep evaluates exactly these two quantities per unknown.
pub trait RowSplit<T> {
    /// Diagonal entry a_ii.
    fn diagonal(&self, i: usize) -> T;
    /// Σ_{j≠i} a_ij · x_j.
    fn off_diag_dot(&self, i: usize, x: &[T]) -> T;
}

/// Operators that must be finalized before they can be applied.
pub trait Assembled {
    /// True once the operator accepts matvecs and solves.
    fn is_assembled(&self) -> bool;
}
