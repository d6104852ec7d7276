//! Error types for interp-skel

use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating inputs or building a skeleton
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The system matrix is not square
    #[error("A not square: {rows} x {cols}")]
    NotSquare {
        /// Number of rows of A
        rows: usize,
        /// Number of columns of A
        cols: usize,
    },

    /// A and B do not have the same number of rows
    #[error("rows(A) != rows(B): {a_rows} vs {b_rows}")]
    RowMismatch {
        /// Rows of A
        a_rows: usize,
        /// Rows of B
        b_rows: usize,
    },

    /// D is not a vector with one entry per row of A
    #[error("rows(D) != rows(A): expected {expected}, got {got}")]
    DiagonalLength {
        /// Expected length (rows of A)
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// u is not a vector with one entry per column of B
    #[error("rows(u) != cols(B): expected {expected}, got {got}")]
    WeightLength {
        /// Expected length (columns of B)
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// The tolerance is not a finite positive real
    #[error("tolerance must be a finite positive real, got {0}")]
    InvalidTolerance(f64),

    /// Compressed-column arrays are structurally inconsistent
    #[error("malformed CSC matrix: {reason}")]
    MalformedMatrix {
        /// What is wrong with the arrays
        reason: String,
    },

    /// diag(A)[row] - beta[row] is not strictly positive
    #[error("non-positive residual energy {energy} at row {row} while building column {column}; is A positive definite?")]
    NonPositiveEnergy {
        /// Output column being built
        column: usize,
        /// Offending row
        row: usize,
        /// Value of diag(A)[row] - beta[row]
        energy: f64,
    },

    /// Growing skeleton or basis storage failed
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },
}

impl Error {
    /// Shorthand for a [`Error::MalformedMatrix`]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedMatrix {
            reason: reason.into(),
        }
    }
}
