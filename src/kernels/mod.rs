//! Sparse primitives used by the skeleton builder
//!
//! All kernels work on caller-owned buffers so the builder can reuse one
//! workspace across every output column:
//!
//! - [`heap`]: in-place index heap and heapsort
//! - [`spmv`]: masked matrix-vector product producing sorted output
//! - [`residual`]: masked merge `r = x - alpha * y` with energy accumulation

pub mod heap;
pub mod residual;
pub mod spmv;

pub use heap::{heap_sort, IndexHeap};
pub use residual::residual_update;
pub use spmv::masked_spmv;
