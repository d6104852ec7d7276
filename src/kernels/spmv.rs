//! Masked sparse matrix-vector product with sorted output
//!
//! Computes `y = A x` for a sparse `x` whose indices may be unsorted.
//! Rows are gathered in a dense scratch array while their indices go into a
//! max-heap that lives in the output index buffer itself; draining the heap
//! then yields the rows in ascending order with no extra allocation.

use num_traits::Float;

use crate::kernels::heap::IndexHeap;
use crate::matrix::SparseMatrixCSC;

/// Computes `y = A x`, skipping rows excluded by `mask`
///
/// # Arguments
///
/// * `a` - Matrix in CSC format
/// * `x_idx`, `x_val` - Sparse input vector (indices need not be sorted)
/// * `y_idx`, `y_val` - Output buffers; must hold every row that can appear
/// * `dense` - Scratch accumulator with one slot per row of `a`
/// * `seen` - Per-row flags; must be all `false` on entry and are all
///   `false` again on return
/// * `mask` - Rows mapped to `Some(_)` are left out of `y`
///
/// # Returns
///
/// The number of entries written to `y_idx[..n]` / `y_val[..n]`, with
/// `y_idx[..n]` strictly ascending. Input entries equal to zero are skipped.
#[allow(clippy::too_many_arguments)]
pub fn masked_spmv<T>(
    a: &SparseMatrixCSC<T>,
    x_idx: &[usize],
    x_val: &[T],
    y_idx: &mut [usize],
    y_val: &mut [T],
    dense: &mut [T],
    seen: &mut [bool],
    mask: &[Option<usize>],
) -> usize
where
    T: Float,
{
    debug_assert_eq!(x_idx.len(), x_val.len());
    debug_assert!(dense.len() >= a.n_rows && seen.len() >= a.n_rows && mask.len() >= a.n_rows);

    let mut heap = IndexHeap::new(y_idx);
    for (&j, &xj) in x_idx.iter().zip(x_val) {
        if xj.abs() == T::zero() {
            continue;
        }
        let (rows, vals) = a.col(j);
        for (&i, &aij) in rows.iter().zip(vals) {
            if mask[i].is_some() {
                continue;
            }
            if !seen[i] {
                heap.push(i);
                seen[i] = true;
                dense[i] = T::zero();
            }
            dense[i] = dense[i] + aij * xj;
        }
    }

    let n = heap.into_sorted();
    for (&i, y) in y_idx[..n].iter().zip(&mut y_val[..n]) {
        *y = dense[i];
        seen[i] = false;
    }
    n
}
