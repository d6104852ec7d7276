//! Reusable buffers for the skeleton builder
//!
//! One workspace is allocated per run and shared by every output column.
//! Between columns it satisfies two invariants: every entry of `active` is
//! `None` and every entry of `seen` is `false`.

use num_traits::Float;

use crate::basis::TriangularBasis;
use crate::error::Result;
use crate::kernels::heap_sort;

/// A sparse vector over rows with a fixed capacity of one slot per row
#[derive(Debug, Clone)]
pub struct SparseBuffer<T> {
    /// Row indices, valid in `idx[..len]`
    pub idx: Vec<usize>,
    /// Values, valid in `val[..len]`
    pub val: Vec<T>,
    /// Number of stored entries
    pub len: usize,
}

impl<T: Float> SparseBuffer<T> {
    /// Creates a buffer able to hold every one of `n_rows` rows
    pub fn new(n_rows: usize) -> Self {
        Self {
            idx: vec![0; n_rows],
            val: vec![T::zero(); n_rows],
            len: 0,
        }
    }

    /// Copies a sparse vector into the buffer
    pub fn load(&mut self, idx: &[usize], val: &[T]) {
        self.len = idx.len();
        self.idx[..self.len].copy_from_slice(idx);
        self.val[..self.len].copy_from_slice(val);
    }

    /// Copies a sparse vector into the buffer, ordering it by row
    ///
    /// Unsorted input is reordered without allocating: values are parked in
    /// `scratch` (one slot per row) while the indices are heap-sorted.
    pub fn load_sorted(&mut self, idx: &[usize], val: &[T], scratch: &mut [T]) {
        if idx.windows(2).all(|w| w[0] < w[1]) {
            self.load(idx, val);
            return;
        }
        for (&row, &value) in idx.iter().zip(val) {
            scratch[row] = value;
        }
        self.len = idx.len();
        self.idx[..self.len].copy_from_slice(idx);
        heap_sort(&mut self.idx[..self.len]);
        for (value, &row) in self.val[..self.len].iter_mut().zip(&self.idx[..self.len]) {
            *value = scratch[row];
        }
    }

    /// Stored row indices
    pub fn indices(&self) -> &[usize] {
        &self.idx[..self.len]
    }

    /// Stored values
    pub fn values(&self) -> &[T] {
        &self.val[..self.len]
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Builder-owned scratch state, sized to the number of rows
#[derive(Debug, Clone)]
pub struct Workspace<T> {
    /// Rows already queued by the matrix-vector product; all `false` outside it
    pub seen: Vec<bool>,
    /// Position of each row in the current column's basis; `None` if unselected
    pub active: Vec<Option<usize>>,
    /// `|Q^T A e_i|^2`, valid for rows currently in the residual
    pub beta: Vec<T>,
    /// Dense accumulator for the matrix-vector product, also used to reorder
    /// unsorted right-hand-side columns
    pub dense: Vec<T>,
    /// Projection scratch for basis extension
    pub projection: Vec<T>,
    /// Current residual
    pub residual: SparseBuffer<T>,
    /// Residual from the previous step, input to the next update
    pub previous: SparseBuffer<T>,
    /// `A q_k` restricted to unselected rows
    pub product: SparseBuffer<T>,
    /// Packed basis for the current column
    pub basis: TriangularBasis<T>,
}

impl<T: Float> Workspace<T> {
    /// Allocates a workspace for `n_rows` rows and `basis_dim` initial basis columns
    pub fn new(n_rows: usize, basis_dim: usize) -> Result<Self> {
        Ok(Self {
            seen: vec![false; n_rows],
            active: vec![None; n_rows],
            beta: vec![T::zero(); n_rows],
            dense: vec![T::zero(); n_rows],
            projection: vec![T::zero(); n_rows],
            residual: SparseBuffer::new(n_rows),
            previous: SparseBuffer::new(n_rows),
            product: SparseBuffer::new(n_rows),
            basis: TriangularBasis::with_dim(basis_dim)?,
        })
    }

    /// Makes the current residual the input of the next update
    pub fn rotate_residual(&mut self) {
        std::mem::swap(&mut self.residual, &mut self.previous);
    }

    /// Unmaps the given rows, restoring the between-columns invariant
    pub fn release(&mut self, rows: &[usize]) {
        for &row in rows {
            self.active[row] = None;
        }
    }

    /// Restores the between-columns invariants unconditionally
    pub fn reset(&mut self) {
        self.active.iter_mut().for_each(|a| *a = None);
        self.seen.iter_mut().for_each(|s| *s = false);
    }

    /// Whether the between-columns invariants hold
    pub fn is_clean(&self) -> bool {
        self.active.iter().all(Option::is_none) && self.seen.iter().all(|&s| !s)
    }
}
