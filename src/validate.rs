//! Input checks performed before any computation
//!
//! These mirror the shape rules of the skeleton builder: A square, B with
//! the same number of rows, D one entry per row of A, u one entry per column
//! of B, and a finite positive tolerance. Nothing is computed or allocated
//! for the output until every check passes.

use ndarray::ArrayView1;
use num_traits::Float;

use crate::error::{Error, Result};
use crate::matrix::SparseMatrixCSC;

/// Checks the system matrix A and its diagonal D
pub fn validate_system<T: Float>(a: &SparseMatrixCSC<T>, d: &ArrayView1<T>) -> Result<()> {
    if a.n_rows != a.n_cols {
        return Err(Error::NotSquare {
            rows: a.n_rows,
            cols: a.n_cols,
        });
    }
    a.check_structure()?;
    if d.len() != a.n_rows {
        return Err(Error::DiagonalLength {
            expected: a.n_rows,
            got: d.len(),
        });
    }
    Ok(())
}

/// Checks the right-hand sides B and column weights u against A
pub fn validate_rhs<T: Float>(
    a: &SparseMatrixCSC<T>,
    b: &SparseMatrixCSC<T>,
    u: &ArrayView1<T>,
) -> Result<()> {
    if a.n_rows != b.n_rows {
        return Err(Error::RowMismatch {
            a_rows: a.n_rows,
            b_rows: b.n_rows,
        });
    }
    b.check_structure()?;
    if u.len() != b.n_cols {
        return Err(Error::WeightLength {
            expected: b.n_cols,
            got: u.len(),
        });
    }
    Ok(())
}

/// Checks that the tolerance is a finite positive real
pub fn validate_tolerance(tol: f64) -> Result<()> {
    if tol.is_finite() && tol > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTolerance(tol))
    }
}

/// Runs every check for a full `interp_skel` call
pub fn validate_inputs<T: Float>(
    a: &SparseMatrixCSC<T>,
    b: &SparseMatrixCSC<T>,
    d: &ArrayView1<T>,
    u: &ArrayView1<T>,
    tol: f64,
) -> Result<()> {
    validate_system(a, d)?;
    validate_rhs(a, b, u)?;
    validate_tolerance(tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_accepts_consistent_inputs() {
        let a = SparseMatrixCSC::<f64>::identity(3);
        let b = SparseMatrixCSC::new(3, 2, vec![0, 1, 2], vec![0, 2], vec![1.0, 1.0]);
        let d = arr1(&[1.0, 1.0, 1.0]);
        let u = arr1(&[1.0, 2.0]);

        assert!(validate_inputs(&a, &b, &d.view(), &u.view(), 0.1).is_ok());
    }

    #[test]
    fn test_rejects_non_square() {
        let a = SparseMatrixCSC::<f64>::zeros(3, 2);
        let d = arr1(&[1.0, 1.0, 1.0]);

        assert_eq!(
            validate_system(&a, &d.view()),
            Err(Error::NotSquare { rows: 3, cols: 2 })
        );
    }

    #[test]
    fn test_rejects_shape_mismatches() {
        let a = SparseMatrixCSC::<f64>::identity(3);
        let b = SparseMatrixCSC::<f64>::zeros(4, 2);
        let u = arr1(&[1.0, 2.0]);
        assert_eq!(
            validate_rhs(&a, &b, &u.view()),
            Err(Error::RowMismatch { a_rows: 3, b_rows: 4 })
        );

        let b = SparseMatrixCSC::<f64>::zeros(3, 2);
        let u = arr1(&[1.0]);
        assert_eq!(
            validate_rhs(&a, &b, &u.view()),
            Err(Error::WeightLength { expected: 2, got: 1 })
        );

        let d = arr1(&[1.0, 1.0]);
        assert_eq!(
            validate_system(&a, &d.view()),
            Err(Error::DiagonalLength { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(validate_tolerance(0.0).is_err());
        assert!(validate_tolerance(-1.0).is_err());
        assert!(validate_tolerance(f64::NAN).is_err());
        assert!(validate_tolerance(f64::INFINITY).is_err());
        assert!(validate_tolerance(1e-8).is_ok());
    }
}
