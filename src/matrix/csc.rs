//! Compressed Sparse Column (CSC) matrix format implementation

use ndarray::Array1;
use num_traits::Num;
use std::fmt;

use crate::error::{Error, Result};

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The CSC format stores a sparse matrix using three arrays:
/// - col_ptr: Array of size n_cols + 1 containing indices into row_idx and values arrays
/// - row_idx: Array of size nnz containing row indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a column the row indices must be unique but need not be sorted.
/// This is the read-only view consumed by the skeleton builder for both
/// the system matrix A and the right-hand sides B.
#[derive(Clone)]
pub struct SparseMatrixCSC<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Column pointers (size: n_cols + 1)
    /// col_ptr[j] is the index in row_idx and values where column j starts
    /// col_ptr[n_cols] is equal to nnz
    pub col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num,
{
    /// Creates a new CSC matrix with the given dimensions and data
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - col_ptr.len() must be n_cols + 1
    /// - row_idx.len() must equal values.len()
    /// - col_ptr[n_cols] must equal row_idx.len()
    /// - every row index must be below n_rows
    ///
    /// Use [`SparseMatrixCSC::try_new`] for input that has not been checked yet.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(col_ptr.len(), n_cols + 1, "col_ptr.len() must be n_cols + 1");
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_eq!(
            col_ptr[n_cols],
            row_idx.len(),
            "col_ptr[n_cols] must equal row_idx.len()"
        );

        for &row in &row_idx {
            assert!(row < n_rows, "Row index {} out of bounds (n_rows = {})", row, n_rows);
        }

        Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Creates a new CSC matrix, reporting structural problems as errors
    ///
    /// Runs [`SparseMatrixCSC::check_structure`] instead of panicking.
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let matrix = Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        };
        matrix.check_structure()?;
        Ok(matrix)
    }

    /// Verifies the compressed-column invariants
    ///
    /// `col_ptr` must have `n_cols + 1` entries, start at zero, never
    /// decrease and end at nnz; every row index must be in range and no row
    /// may appear twice in the same column.
    pub fn check_structure(&self) -> Result<()> {
        let (n_rows, n_cols) = (self.n_rows, self.n_cols);
        let (col_ptr, row_idx) = (&self.col_ptr, &self.row_idx);

        if col_ptr.len() != n_cols + 1 {
            return Err(Error::malformed(format!(
                "col_ptr has length {}, expected {}",
                col_ptr.len(),
                n_cols + 1
            )));
        }
        if row_idx.len() != self.values.len() {
            return Err(Error::malformed(format!(
                "{} row indices but {} values",
                row_idx.len(),
                self.values.len()
            )));
        }
        if col_ptr[0] != 0 || col_ptr[n_cols] != row_idx.len() {
            return Err(Error::malformed(format!(
                "col_ptr must span 0..{}, got {}..{}",
                row_idx.len(),
                col_ptr[0],
                col_ptr[n_cols]
            )));
        }
        if let Some(j) = col_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::malformed(format!("col_ptr decreases at column {}", j)));
        }

        // Last column that claimed each row, for duplicate detection
        let mut seen = vec![usize::MAX; n_rows];
        for j in 0..n_cols {
            for &row in &row_idx[col_ptr[j]..col_ptr[j + 1]] {
                if row >= n_rows {
                    return Err(Error::malformed(format!(
                        "row index {} out of bounds (n_rows = {})",
                        row, n_rows
                    )));
                }
                if seen[row] == j {
                    return Err(Error::malformed(format!(
                        "row {} appears twice in column {}",
                        row, j
                    )));
                }
                seen[row] = j;
            }
        }

        Ok(())
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the row indices and values stored in column j
    pub fn col(&self, j: usize) -> (&[usize], &[T]) {
        let range = self.col_ptr[j]..self.col_ptr[j + 1];
        (&self.row_idx[range.clone()], &self.values[range])
    }

    /// Returns the number of stored entries in column j
    pub fn col_nnz(&self, j: usize) -> usize {
        self.col_ptr[j + 1] - self.col_ptr[j]
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];

        self.row_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&row, val)| (row, val))
    }

    /// Extracts the main diagonal as a dense vector
    ///
    /// Missing diagonal entries are zero.
    pub fn diagonal(&self) -> Array1<T> {
        let n = self.n_rows.min(self.n_cols);
        let mut diag = Array1::from_elem(n, T::zero());
        for j in 0..n {
            if let Some((_, &val)) = self.col_iter(j).find(|&(row, _)| row == j) {
                diag[j] = val;
            }
        }
        diag
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::from_diagonal(&vec![T::one(); n])
    }

    /// Creates a square diagonal matrix with the given diagonal entries
    pub fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        Self {
            n_rows: n,
            n_cols: n,
            col_ptr: (0..=n).collect(),
            row_idx: (0..n).collect(),
            values: diag.to_vec(),
        }
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        for j in 0..self.n_cols.min(5) {
            let (rows, vals) = self.col(j);
            let shown: Vec<_> = rows.iter().zip(vals).take(5).collect();
            write!(f, "    col {}: {:?}", j, shown)?;
            if rows.len() > shown.len() {
                write!(f, " ... ({} more)", rows.len() - shown.len())?;
            }
            writeln!(f)?;
        }
        if self.n_cols > 5 {
            writeln!(f, "    ... ({} more columns)", self.n_cols - 5)?;
        }

        write!(f, "}}")
    }
}
