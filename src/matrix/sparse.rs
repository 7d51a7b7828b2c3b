//! Incrementally assembled square sparse matrix.
//!
//! A [`SparseMatrix`] is built entry by entry with [`SparseMatrix::set`] and then
//! finalized with [`SparseMatrix::close`] into a compressed row layout. Each row
//! keeps its diagonal apart from the off-diagonal (column, value) pairs, so
//! insertion order does not matter and the diagonal is reachable in O(1) by the
//! relaxation sweeps.

use crate::core::traits::{Assembled, Indexing, MatVec, RowSplit};
use crate::error::SolverError;
use faer::Mat;
use faer::sparse::{SparseRowMat, SymbolicSparseRowMat};
use num_traits::Float;

/// One row during assembly: diagonal plus off-diagonals sorted by column.
#[derive(Clone, Debug)]
struct RowBuilder<T> {
    diag: T,
    off: Vec<(usize, T)>,
}

/// Compressed form produced by `close`: the diagonal plus a faer CSR matrix
/// holding only the off-diagonal entries.
#[derive(Clone, Debug)]
struct Compressed<T> {
    diag: Vec<T>,
    off: SparseRowMat<usize, T>,
}

impl<T: Float> Compressed<T> {
    fn row(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let cols = self.off.symbolic().col_idx_of_row_raw(i);
        cols.iter().copied().zip(self.off.val_of_row(i).iter().copied())
    }

    fn off_diag_dot(&self, i: usize, x: &[T]) -> T {
        self.row(i).fold(T::zero(), |acc, (j, v)| acc + v * x[j])
    }
}

#[derive(Clone, Debug)]
enum Storage<T> {
    Open(Vec<RowBuilder<T>>),
    Closed(Compressed<T>),
}

/// Square sparse matrix with an explicit diagonal per row.
#[derive(Clone, Debug)]
pub struct SparseMatrix<T> {
    n: usize,
    storage: Storage<T>,
}

impl<T: Float> SparseMatrix<T> {
    /// Empty, open `n x n` matrix.
    pub fn new(n: usize) -> Self {
        let rows = vec![RowBuilder { diag: T::zero(), off: Vec::new() }; n];
        Self { n, storage: Storage::Open(rows) }
    }

    /// Dimension of the (square) matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Whether [`SparseMatrix::close`] has been called.
    pub fn is_closed(&self) -> bool {
        matches!(self.storage, Storage::Closed(_))
    }

    /// Number of stored entries, counting every diagonal.
    pub fn nnz(&self) -> usize {
        match &self.storage {
            Storage::Open(rows) => self.n + rows.iter().map(|r| r.off.len()).sum::<usize>(),
            Storage::Closed(c) => self.n + c.off.val().len(),
        }
    }

    /// Insert or overwrite the entry at `(row, col)`.
    ///
    /// Entries may be given in any order; the diagonal is stored separately.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), SolverError> {
        if row >= self.n || col >= self.n {
            return Err(SolverError::IndexOutOfBounds { row, col, dim: self.n });
        }
        let rows = match &mut self.storage {
            Storage::Open(rows) => rows,
            Storage::Closed(_) => return Err(SolverError::MatrixClosed),
        };
        let r = &mut rows[row];
        if row == col {
            r.diag = value;
            return Ok(());
        }
        match r.off.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => r.off[pos].1 = value,
            Err(pos) => r.off.insert(pos, (col, value)),
        }
        Ok(())
    }

    /// Finalize into compressed row form. A second call does nothing.
    pub fn close(&mut self) {
        let rows = match &mut self.storage {
            Storage::Open(rows) => std::mem::take(rows),
            Storage::Closed(_) => return,
        };
        let nnz_off = rows.iter().map(|r| r.off.len()).sum();
        let mut diag = Vec::with_capacity(self.n);
        let mut row_ptr = Vec::with_capacity(self.n + 1);
        let mut col_idx = Vec::with_capacity(nnz_off);
        let mut values = Vec::with_capacity(nnz_off);
        row_ptr.push(0);
        for r in rows {
            diag.push(r.diag);
            for (c, v) in r.off {
                col_idx.push(c);
                values.push(v);
            }
            row_ptr.push(col_idx.len());
        }
        // Builder rows are kept sorted and duplicate-free, which is what the
        // checked constructor requires.
        let symbolic = SymbolicSparseRowMat::new_checked(self.n, self.n, row_ptr, None, col_idx);
        let off = SparseRowMat::new(symbolic, values);
        self.storage = Storage::Closed(Compressed { diag, off });
    }

    /// Value at `(row, col)`, or zero when no entry is stored.
    ///
    /// # Panics
    /// If `row` or `col` is outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.n && col < self.n, "index ({row}, {col}) out of bounds for dimension {}", self.n);
        if row == col {
            return self.diagonal(row);
        }
        match &self.storage {
            Storage::Open(rows) => {
                let off = &rows[row].off;
                match off.binary_search_by_key(&col, |&(c, _)| c) {
                    Ok(pos) => off[pos].1,
                    Err(_) => T::zero(),
                }
            }
            Storage::Closed(c) => {
                let cols = c.off.symbolic().col_idx_of_row_raw(row);
                match cols.binary_search(&col) {
                    Ok(pos) => c.off.val_of_row(row)[pos],
                    Err(_) => T::zero(),
                }
            }
        }
    }

    /// Diagonal entry of `row`, O(1).
    ///
    /// # Panics
    /// If `row` is outside the matrix.
    pub fn diagonal(&self, row: usize) -> T {
        match &self.storage {
            Storage::Open(rows) => rows[row].diag,
            Storage::Closed(c) => c.diag[row],
        }
    }

    /// Zero every off-diagonal value of `row`, leaving the diagonal untouched.
    ///
    /// Used to eliminate a Dirichlet row, whose equation becomes `a_ii u_i = f_i`.
    /// The sparsity pattern is kept; only the values are cleared.
    ///
    /// # Panics
    /// If `row` is outside the matrix.
    pub fn zero_off_diag(&mut self, row: usize) {
        match &mut self.storage {
            Storage::Open(rows) => {
                for entry in rows[row].off.iter_mut() {
                    entry.1 = T::zero();
                }
            }
            Storage::Closed(c) => {
                c.off.val_of_row_mut(row).iter_mut().for_each(|v| *v = T::zero());
            }
        }
    }

    /// Compute `y = A x`.
    pub fn multiply(&self, x: &[T], y: &mut [T]) -> Result<(), SolverError> {
        let c = match &self.storage {
            Storage::Closed(c) => c,
            Storage::Open(_) => return Err(SolverError::NotFinalized),
        };
        for len in [x.len(), y.len()] {
            if len != self.n {
                return Err(SolverError::DimensionMismatch { expected: self.n, found: len });
            }
        }
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = c.diag[i] * x[i] + c.off_diag_dot(i, x);
        }
        Ok(())
    }

    /// Dense copy, for inspection and comparison with dense reference solves.
    pub fn to_dense(&self) -> Mat<T> {
        Mat::from_fn(self.n, self.n, |i, j| self.get(i, j))
    }
}

impl<T: Float> MatVec<Vec<T>> for SparseMatrix<T> {
    /// # Panics
    /// If the matrix is still open or a length does not match.
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        if let Err(e) = self.multiply(x, y) {
            panic!("sparse matvec: {e}");
        }
    }
}

impl<T: Float> RowSplit<T> for SparseMatrix<T> {
    fn diagonal(&self, i: usize) -> T {
        SparseMatrix::diagonal(self, i)
    }

    fn off_diag_dot(&self, i: usize, x: &[T]) -> T {
        match &self.storage {
            Storage::Closed(c) => c.off_diag_dot(i, x),
            Storage::Open(rows) => rows[i]
                .off
                .iter()
                .fold(T::zero(), |acc, &(j, v)| acc + v * x[j]),
        }
    }
}

impl<T> Indexing for SparseMatrix<T> {
    fn nrows(&self) -> usize {
        self.n
    }
}

impl<T> Assembled for SparseMatrix<T> {
    fn is_assembled(&self) -> bool {
        matches!(self.storage, Storage::Closed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tridiag(n: usize) -> SparseMatrix<f64> {
        let mut a = SparseMatrix::new(n);
        for i in 0..n {
            if i > 0 {
                a.set(i, i - 1, -1.0).unwrap();
            }
            if i + 1 < n {
                a.set(i, i + 1, -1.0).unwrap();
            }
            a.set(i, i, 2.0).unwrap();
        }
        a
    }

    #[test]
    fn identity_multiply() {
        let mut m = SparseMatrix::new(3);
        for i in 0..3 {
            m.set(i, i, 1.0).unwrap();
        }
        m.close();
        let x = vec![2.0, 3.0, 5.0];
        let mut y = vec![0.0; 3];
        m.multiply(&x, &mut y).unwrap();
        assert_eq!(y, x);
    }

    #[test]
    fn diagonal_need_not_come_first() {
        let mut a = tridiag(4);
        a.close();
        for i in 0..4 {
            assert_eq!(a.diagonal(i), 2.0);
        }
        assert_eq!(a.get(1, 0), -1.0);
        assert_eq!(a.get(0, 3), 0.0);
        assert_eq!(a.nnz(), 10);
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let mut a = SparseMatrix::new(2);
        a.set(0, 1, 3.0).unwrap();
        a.set(0, 1, 7.0).unwrap();
        a.set(0, 0, 1.0).unwrap();
        a.set(0, 0, 4.0).unwrap();
        assert_eq!(a.get(0, 1), 7.0);
        assert_eq!(a.get(0, 0), 4.0);
        assert_eq!(a.nnz(), 3);
    }

    #[test]
    fn closed_matrix_rejects_insertion() {
        let mut a = tridiag(3);
        a.close();
        a.close();
        assert!(matches!(a.set(0, 0, 1.0), Err(SolverError::MatrixClosed)));
    }

    #[test]
    fn out_of_range_entry_is_rejected() {
        let mut a = SparseMatrix::<f64>::new(2);
        assert!(matches!(
            a.set(2, 0, 1.0),
            Err(SolverError::IndexOutOfBounds { row: 2, col: 0, dim: 2 })
        ));
    }

    #[test]
    fn open_matrix_cannot_multiply() {
        let a = tridiag(3);
        let mut y = vec![0.0; 3];
        assert!(matches!(a.multiply(&[1.0; 3], &mut y), Err(SolverError::NotFinalized)));
    }

    #[test]
    fn multiply_checks_lengths() {
        let mut a = tridiag(3);
        a.close();
        let mut y = vec![0.0; 2];
        assert!(matches!(
            a.multiply(&[1.0; 3], &mut y),
            Err(SolverError::DimensionMismatch { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn zero_off_diag_keeps_diagonal_in_both_states() {
        let mut open = tridiag(3);
        open.zero_off_diag(1);
        assert_eq!(open.get(1, 0), 0.0);
        assert_eq!(open.get(1, 1), 2.0);

        let mut closed = tridiag(3);
        closed.close();
        closed.zero_off_diag(1);
        assert_eq!(closed.get(1, 2), 0.0);
        assert_eq!(closed.get(1, 1), 2.0);
        assert_eq!(closed.get(0, 1), -1.0);
    }

    #[test]
    fn closing_preserves_every_row() {
        let mut a = SparseMatrix::new(4);
        for &(i, j, v) in &[(2, 3, 5.0), (2, 0, -1.5), (0, 2, 4.0), (3, 3, 6.0), (2, 2, 3.0), (0, 0, 1.0), (1, 1, 2.0)] {
            a.set(i, j, v).unwrap();
        }
        let open = a.clone();
        a.close();

        let x = [1.0, -2.0, 0.5, 3.0];
        for i in 0..4 {
            assert_eq!(RowSplit::off_diag_dot(&a, i, &x), RowSplit::off_diag_dot(&open, i, &x));
            for j in 0..4 {
                assert_eq!(a.get(i, j), open.get(i, j), "entry ({i}, {j})");
            }
        }
        let mut y = vec![0.0; 4];
        a.multiply(&x, &mut y).unwrap();
        assert_eq!(y, vec![3.0, -4.0, 15.0, 18.0]);
        assert_eq!(a.nnz(), 7);
    }

    #[test]
    #[should_panic]
    fn diagonal_out_of_range_panics() {
        let mut a = tridiag(3);
        a.close();
        a.diagonal(3);
    }

    #[test]
    #[should_panic]
    fn zero_off_diag_out_of_range_panics() {
        let mut a = tridiag(3);
        a.close();
        a.zero_off_diag(3);
    }

    #[test]
    fn dense_copy_matches_entries() {
        let mut a = tridiag(3);
        a.close();
        let d = a.to_dense();
        assert_eq!(d[(0, 0)], 2.0);
        assert_eq!(d[(0, 1)], -1.0);
        assert_eq!(d[(0, 2)], 0.0);
    }
}
