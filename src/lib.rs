//! # interp-skel: greedy sparse interpolation skeletons
//!
//! Given a symmetric positive definite sparse matrix A and sparse
//! right-hand sides B, this library selects, column by column, a small set
//! of rows and coefficients that approximately minimize
//! `f(x) = 0.5 x^T A x - B_j^T x`. The selected rows form the "skeleton"
//! of an algebraic-multigrid style interpolation or approximation operator.
//!
//! ## Overview
//!
//! Each output column is built by an orthogonal-matching-pursuit style loop
//! that keeps an incrementally extended A-orthonormal basis:
//!
//! 1. **Selection**: score every row left in the residual and pick the best
//! 2. **Basis extension**: add one column to a packed upper-triangular
//!    A-orthonormal basis
//! 3. **Residual update**: subtract the new direction's image under A with a
//!    heap-merging sparse matrix-vector product and a sorted merge
//!
//! The loop stops once a stopping statistic (maximum or sum of normalized
//! residual entries) falls to `tol^2 / 2` or `tol / 2` respectively.
//!
//! ## Usage
//!
//! ```
//! use interp_skel::{interp_skel, SkeletonConfig, SparseMatrixCSC, StopPolicy};
//! use ndarray::arr1;
//!
//! // 1-D Laplacian and one right-hand side
//! let a = SparseMatrixCSC::new(
//!     3, 3,
//!     vec![0, 2, 5, 7],
//!     vec![0, 1, 0, 1, 2, 1, 2],
//!     vec![2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0],
//! );
//! let b = SparseMatrixCSC::new(3, 1, vec![0, 1], vec![1], vec![1.0]);
//! let d = a.diagonal();
//! let u = arr1(&[1.0]);
//!
//! let config = SkeletonConfig::with_tolerance(0.1).with_stop_policy(StopPolicy::SumNormalized);
//! let out = interp_skel(&a, &b, d.view(), u.view(), &config).unwrap();
//! assert!(out.skeleton.col(0).contains(&1));
//! ```

pub mod basis;
pub mod builder;
pub mod constants;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod utils;
pub mod validate;

// Re-export primary components
pub use builder::{interp_skel, ColumnReport, InterpSkeleton, SkeletonBuilder, SkeletonConfig, StopPolicy};
pub use error::{Error, Result};
pub use kernels::{heap_sort, masked_spmv, residual_update};
pub use matrix::{SkeletonMatrix, SparseMatrixCSC};
pub use utils::{from_sprs_csc, skeleton_to_sprs, to_sprs_csc};
pub use validate::validate_inputs;

/// Version information for the interp-skel library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
