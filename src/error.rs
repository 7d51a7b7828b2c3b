use thiserror::Error;

// Unified error type for fdsolve

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("matrix is closed; no further insertions are allowed")]
    MatrixClosed,
    #[error("matrix must be closed before multiplication or solve")]
    NotFinalized,
    #[error("entry ({row}, {col}) is outside a {dim}x{dim} matrix")]
    IndexOutOfBounds { row: usize, col: usize, dim: usize },
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("unknown solver method: {0} (expected jacobi, sor, ssor or cg)")]
    UnknownMethod(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
