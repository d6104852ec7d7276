//! Boolean sparsity pattern produced by the skeleton builder

use log::debug;
use std::fmt;

use crate::constants::GROWTH_FACTOR;
use crate::error::{Error, Result};

/// A sparse boolean matrix in CSC layout
///
/// Each stored entry only records presence. Row indices are ascending
/// within a finished column. The row storage has an explicit capacity
/// (`nzmax`) that doubles whenever a push would exceed it, and is trimmed
/// back to the actual count by [`SkeletonMatrix::finalize`].
#[derive(Clone, PartialEq)]
pub struct SkeletonMatrix {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Column pointers; holds one entry per started column plus the end
    /// marker once the matrix is finalized
    col_ptr: Vec<usize>,

    /// Row indices of the stored entries
    row_idx: Vec<usize>,

    /// Current capacity of `row_idx`
    nzmax: usize,
}

impl SkeletonMatrix {
    /// Creates an empty pattern with room for `nzmax` entries
    pub fn with_capacity(n_rows: usize, n_cols: usize, nzmax: usize) -> Result<Self> {
        let nzmax = nzmax.max(1);
        let mut col_ptr = Vec::new();
        try_reserve(&mut col_ptr, n_cols + 1)?;
        let mut row_idx = Vec::new();
        try_reserve(&mut row_idx, nzmax)?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            nzmax,
        })
    }

    /// Builds a finished pattern from raw CSC arrays
    ///
    /// # Panics
    ///
    /// Panics if `col_ptr` does not have `n_cols + 1` entries ending at
    /// `row_idx.len()`, or if any column is not strictly ascending.
    pub fn from_parts(n_rows: usize, n_cols: usize, col_ptr: Vec<usize>, row_idx: Vec<usize>) -> Self {
        assert_eq!(col_ptr.len(), n_cols + 1, "col_ptr.len() must be n_cols + 1");
        assert_eq!(col_ptr[n_cols], row_idx.len(), "col_ptr[n_cols] must equal row_idx.len()");
        for j in 0..n_cols {
            let rows = &row_idx[col_ptr[j]..col_ptr[j + 1]];
            assert!(
                rows.windows(2).all(|w| w[0] < w[1]),
                "rows of column {} must be strictly ascending",
                j
            );
            assert!(rows.iter().all(|&r| r < n_rows), "row index out of bounds in column {}", j);
        }
        let nzmax = row_idx.len();

        Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            nzmax,
        }
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    /// Current capacity for stored entries
    pub fn nzmax(&self) -> usize {
        self.nzmax
    }

    /// Column pointers (complete once the matrix is finalized)
    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    /// Row indices of all stored entries
    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    /// Returns the selected rows of a finished column
    pub fn col(&self, j: usize) -> &[usize] {
        &self.row_idx[self.col_ptr[j]..self.col_ptr[j + 1]]
    }

    /// Whether entry (i, j) is part of the pattern
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.col(j).binary_search(&i).is_ok()
    }

    /// Marks the start of the next column and returns its storage offset
    pub(crate) fn begin_column(&mut self) -> usize {
        let start = self.row_idx.len();
        self.col_ptr.push(start);
        start
    }

    /// Appends a row to the current column, doubling capacity if needed
    pub(crate) fn push(&mut self, row: usize) -> Result<()> {
        if self.row_idx.len() == self.nzmax {
            let grown = self.nzmax * GROWTH_FACTOR;
            try_reserve(&mut self.row_idx, grown)?;
            debug!("skeleton storage grown from {} to {} entries", self.nzmax, grown);
            self.nzmax = grown;
        }
        self.row_idx.push(row);
        Ok(())
    }

    /// Rows appended since the given column offset
    pub(crate) fn tail(&self, start: usize) -> &[usize] {
        &self.row_idx[start..]
    }

    /// Mutable rows appended since the given column offset
    pub(crate) fn tail_mut(&mut self, start: usize) -> &mut [usize] {
        &mut self.row_idx[start..]
    }

    /// Closes the last column and trims capacity to the stored count
    pub(crate) fn finalize(&mut self) {
        self.col_ptr.push(self.row_idx.len());
        self.row_idx.shrink_to_fit();
        self.nzmax = self.row_idx.len();
        debug_assert_eq!(self.col_ptr.len(), self.n_cols + 1);
    }
}

/// Reserves room for `total` elements, reporting failure instead of aborting
fn try_reserve(buf: &mut Vec<usize>, total: usize) -> Result<()> {
    let additional = total.saturating_sub(buf.len());
    buf.try_reserve_exact(additional).map_err(|_| Error::OutOfMemory {
        size: total * std::mem::size_of::<usize>(),
    })
}

impl fmt::Debug for SkeletonMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SkeletonMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {} (nzmax {})", self.nnz(), self.nzmax)?;

        let finished = self.col_ptr.len().saturating_sub(1);
        for j in 0..finished.min(5) {
            writeln!(f, "    col {}: {:?}", j, self.col(j))?;
        }
        if finished > 5 {
            writeln!(f, "    ... ({} more columns)", finished - 5)?;
        }

        write!(f, "}}")
    }
}
