// Matrix data structures

pub mod csc;
pub mod skeleton;

pub use csc::SparseMatrixCSC;
pub use skeleton::SkeletonMatrix;
