//! Integration tests for the sparse kernels against dense references

use interp_skel::kernels::IndexHeap;
use interp_skel::utils::{csc_from_dense, csc_to_dense};
use interp_skel::{heap_sort, masked_spmv, residual_update, SparseMatrixCSC};
use ndarray::{arr2, Array1};

/// Creates a 5x5 symmetric matrix with a specific pattern:
/// [ 4.0  1.0  0.0  0.0  2.0 ]
/// [ 1.0  5.0  0.0  1.0  0.0 ]
/// [ 0.0  0.0  3.0  0.0  0.0 ]
/// [ 0.0  1.0  0.0  6.0  1.0 ]
/// [ 2.0  0.0  0.0  1.0  7.0 ]
fn create_test_matrix() -> SparseMatrixCSC<f64> {
    let dense = arr2(&[
        [4.0, 1.0, 0.0, 0.0, 2.0],
        [1.0, 5.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 3.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 6.0, 1.0],
        [2.0, 0.0, 0.0, 1.0, 7.0],
    ]);
    csc_from_dense(dense.view())
}

/// Dense `A x` for a sparse `x`
fn dense_product(a: &SparseMatrixCSC<f64>, x_idx: &[usize], x_val: &[f64]) -> Array1<f64> {
    let dense = csc_to_dense(a);
    let mut x = Array1::zeros(a.n_cols);
    for (&i, &v) in x_idx.iter().zip(x_val) {
        x[i] = v;
    }
    dense.dot(&x)
}

#[test]
fn test_spmv_matches_dense_product() {
    let a = create_test_matrix();
    let n = a.n_rows;
    let x_idx = [4, 0, 2];
    let x_val = [1.0, -2.0, 0.5];

    let mut y_idx = vec![0; n];
    let mut y_val = vec![0.0; n];
    let mut dense = vec![0.0; n];
    let mut seen = vec![false; n];
    let mask = vec![None; n];

    let len = masked_spmv(&a, &x_idx, &x_val, &mut y_idx, &mut y_val, &mut dense, &mut seen, &mask);
    let reference = dense_product(&a, &x_idx, &x_val);

    // Rows reached by columns 0, 2 and 4
    assert_eq!(&y_idx[..len], &[0, 1, 2, 3, 4]);
    for (&i, &v) in y_idx[..len].iter().zip(&y_val[..len]) {
        assert!((v - reference[i]).abs() < 1e-12, "row {}: {} vs {}", i, v, reference[i]);
    }
    assert!(seen.iter().all(|&s| !s));
}

#[test]
fn test_spmv_mask_and_zero_inputs() {
    let a = create_test_matrix();
    let n = a.n_rows;
    let x_idx = [1, 2];
    let x_val = [1.0, 0.0];

    let mut y_idx = vec![0; n];
    let mut y_val = vec![0.0; n];
    let mut dense = vec![0.0; n];
    let mut seen = vec![false; n];
    let mut mask = vec![None; n];
    mask[1] = Some(0);

    let len = masked_spmv(&a, &x_idx, &x_val, &mut y_idx, &mut y_val, &mut dense, &mut seen, &mask);

    // Column 2 is skipped entirely and row 1 is masked
    assert_eq!(&y_idx[..len], &[0, 3]);
    assert_eq!(&y_val[..len], &[1.0, 1.0]);
}

#[test]
fn test_residual_update_without_mask() {
    let n = 6;
    let x_idx = [0, 2, 5];
    let x_val = [1.0, 2.0, 3.0];
    let y_idx = [1, 2, 4];
    let y_val = [0.5, 1.0, -2.0];
    let alpha = 2.0;

    let mut r_idx = vec![0; n];
    let mut r_val = vec![0.0; n];
    let mut beta = vec![0.25; n];
    let mask = vec![None; n];

    let len = residual_update(
        &x_idx, &x_val, alpha, &y_idx, &y_val, &mut r_idx, &mut r_val, &mut beta, &mask,
    );

    assert_eq!(&r_idx[..len], &[0, 1, 2, 4, 5]);
    assert_eq!(&r_val[..len], &[1.0, -1.0, 0.0, 4.0, 3.0]);

    // Row 2 was in both inputs and accumulates; rows 1 and 4 are assigned
    assert_eq!(beta[1], 0.25);
    assert_eq!(beta[2], 1.25);
    assert_eq!(beta[4], 4.0);
    // Rows outside y keep their value
    assert_eq!(beta[0], 0.25);
    assert_eq!(beta[5], 0.25);
}

#[test]
fn test_residual_update_masked_rows_still_update_beta() {
    let n = 4;
    let x_idx = [0, 1];
    let x_val = [1.0, 1.0];
    let y_idx = [1, 3];
    let y_val = [2.0, 3.0];

    let mut r_idx = vec![0; n];
    let mut r_val = vec![0.0; n];
    let mut beta = vec![1.0; n];
    let mut mask = vec![None; n];
    mask[1] = Some(0);
    mask[3] = Some(1);

    let len = residual_update(
        &x_idx, &x_val, 1.0, &y_idx, &y_val, &mut r_idx, &mut r_val, &mut beta, &mask,
    );

    assert_eq!(&r_idx[..len], &[0]);
    assert_eq!(beta[1], 5.0);
    assert_eq!(beta[3], 9.0);
}

#[test]
fn test_heap_sort_and_index_heap() {
    let mut values = vec![9, 2, 7, 0, 5, 3];
    heap_sort(&mut values);
    assert_eq!(values, vec![0, 2, 3, 5, 7, 9]);

    let mut slots = [0usize; 4];
    let mut heap = IndexHeap::new(&mut slots);
    for v in [3, 1, 8, 4] {
        heap.push(v);
    }
    assert_eq!(heap.len(), 4);
    let n = heap.into_sorted();
    assert_eq!(&slots[..n], &[1, 3, 4, 8]);
}
