//! Utilities for converting between our matrix formats and external libraries

use crate::matrix::{SkeletonMatrix, SparseMatrixCSC};
use ndarray::{Array2, ArrayView2};
use num_traits::Num;
use sprs::CsMat;

/// Converts our CSC matrix format to sprs CsMat format (as CSC)
///
/// sprs requires sorted indices, so each column is sorted on the way out.
pub fn to_sprs_csc<T>(matrix: &SparseMatrixCSC<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut row_idx = Vec::with_capacity(matrix.nnz());
    let mut values = Vec::with_capacity(matrix.nnz());

    for j in 0..matrix.n_cols {
        let mut entries: Vec<(usize, T)> = matrix.col_iter(j).map(|(row, &val)| (row, val)).collect();
        entries.sort_unstable_by_key(|&(row, _)| row);
        for (row, val) in entries {
            row_idx.push(row);
            values.push(val);
        }
    }

    CsMat::new_csc(
        (matrix.n_rows, matrix.n_cols),
        matrix.col_ptr.clone(),
        row_idx,
        values,
    )
}

/// Converts sprs CsMat in CSC format to our SparseMatrixCSC format
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> SparseMatrixCSC<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSC format
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::new(shape.0, shape.1, indptr, indices, data)
}

/// Converts a finished skeleton to a boolean sprs CsMat (as CSC)
pub fn skeleton_to_sprs(skeleton: &SkeletonMatrix) -> CsMat<bool> {
    CsMat::new_csc(
        (skeleton.n_rows, skeleton.n_cols),
        skeleton.col_ptr().to_vec(),
        skeleton.row_idx().to_vec(),
        vec![true; skeleton.nnz()],
    )
}

/// Builds a CSC matrix from the nonzeros of a dense matrix
pub fn csc_from_dense<T>(dense: ArrayView2<T>) -> SparseMatrixCSC<T>
where
    T: Copy + Num,
{
    let (n_rows, n_cols) = dense.dim();
    let mut col_ptr = Vec::with_capacity(n_cols + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);
    for j in 0..n_cols {
        for i in 0..n_rows {
            let val = dense[[i, j]];
            if !val.is_zero() {
                row_idx.push(i);
                values.push(val);
            }
        }
        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC::new(n_rows, n_cols, col_ptr, row_idx, values)
}

/// Expands a CSC matrix into a dense matrix
pub fn csc_to_dense<T>(matrix: &SparseMatrixCSC<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::from_elem((matrix.n_rows, matrix.n_cols), T::zero());
    for j in 0..matrix.n_cols {
        for (i, &val) in matrix.col_iter(j) {
            dense[[i, j]] = val;
        }
    }
    dense
}
