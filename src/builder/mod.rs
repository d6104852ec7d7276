//! Greedy construction of sparse interpolation skeletons
//!
//! For every column `j` of B the builder approximately minimizes
//! `f(x) = 0.5 x^T A x - B_j^T x` over sparsely supported `x`. It keeps an
//! A-orthonormal basis `Q` for the rows chosen so far and the residual
//! `r = (I - A Q Q^T) B e_j`, and at each step:
//!
//! 1. scores every residual row `i` by `w_i = r_i / sqrt(d_i - beta_i)`,
//!    where `beta_i = |Q^T A e_i|^2`, and picks the largest `|w_i|`;
//! 2. stops if the stopping statistic built from `|r_i / (d_i - beta_i)|`
//!    is at or below the threshold;
//! 3. otherwise extends `Q` by the chosen row, adds `u_j w q_k` to the
//!    weighted sum and updates the residual with `A q_k`.
//!
//! Selected rows become the skeleton's pattern for column `j`.

pub mod config;
pub mod workspace;

pub use config::{SkeletonConfig, StopPolicy};
pub use workspace::{SparseBuffer, Workspace};

use log::{info, trace};
use ndarray::{Array1, ArrayView1};
use num_traits::{Float, NumCast};

use crate::error::{Error, Result};
use crate::kernels::{heap_sort, masked_spmv, residual_update};
use crate::matrix::{SkeletonMatrix, SparseMatrixCSC};
use crate::validate::{validate_rhs, validate_system, validate_tolerance};

/// Summary of the greedy steps taken for one output column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport<T> {
    /// Number of rows selected
    pub steps: usize,
    /// Stopping statistic when the column was finished
    pub final_norm: T,
    /// Statistic before each step, plus the final one; empty unless
    /// [`SkeletonConfig::record_norm_history`] is set
    pub norm_history: Vec<T>,
}

impl<T: Float> ColumnReport<T> {
    fn empty() -> Self {
        Self {
            steps: 0,
            final_norm: T::zero(),
            norm_history: Vec::new(),
        }
    }
}

/// Output of a skeleton build
#[derive(Debug, Clone)]
pub struct InterpSkeleton<T> {
    /// Selected rows per column of B (`n_rows(A)` x `n_cols(B)`)
    pub skeleton: SkeletonMatrix,
    /// `sum_j u_j X e_j`
    pub weighted_sum: Array1<T>,
    /// One report per column of B
    pub columns: Vec<ColumnReport<T>>,
}

/// Row chosen for the next basis extension
#[derive(Debug, Clone, Copy)]
struct Pivot<T> {
    row: usize,
    weight: T,
    energy: T,
}

impl<T: Float> Pivot<T> {
    fn has_energy(&self) -> bool {
        self.energy > T::zero() && self.energy.is_finite()
    }
}

/// Scores the residual, returning the best row and the stopping statistic
///
/// Rows whose residual is exactly zero are neither scored nor counted, so a
/// semidefinite A converges once the residual vanishes. Among the rest, a
/// row with no remaining energy (`d_i - beta_i` not positive) wins outright
/// with an infinite statistic, and is rejected when the basis is extended.
/// Otherwise ties on `|w_i|` go to the lowest row index. A residual with no
/// nonzero entry yields no pivot and a statistic of zero.
fn select_pivot<T: Float>(
    residual: &SparseBuffer<T>,
    diag: &ArrayView1<T>,
    beta: &[T],
    policy: StopPolicy,
) -> (Option<Pivot<T>>, T) {
    let mut best: Option<Pivot<T>> = None;
    let mut degenerate: Option<Pivot<T>> = None;
    let mut norm = T::zero();

    for (&i, &r) in residual.indices().iter().zip(residual.values()) {
        if r == T::zero() {
            continue;
        }
        let energy = diag[i] - beta[i];
        if !(energy > T::zero() && energy.is_finite()) {
            if degenerate.map_or(true, |p| i < p.row) {
                degenerate = Some(Pivot { row: i, weight: r, energy });
            }
            continue;
        }
        let weight = r / energy.sqrt();
        norm = policy.fold(norm, (r / energy).abs());

        let better = match best {
            None => true,
            Some(p) => {
                weight.abs() > p.weight.abs() || (weight.abs() == p.weight.abs() && i < p.row)
            }
        };
        if better {
            best = Some(Pivot { row: i, weight, energy });
        }
    }

    match degenerate {
        Some(p) => (Some(p), T::infinity()),
        None => (best, norm),
    }
}

/// Greedy skeleton builder for a fixed system matrix
///
/// The builder owns a [`Workspace`] sized to A and reuses it for every
/// column of every call to [`SkeletonBuilder::build`].
pub struct SkeletonBuilder<'a, T> {
    a: &'a SparseMatrixCSC<T>,
    diag: ArrayView1<'a, T>,
    config: SkeletonConfig,
    threshold: T,
    workspace: Workspace<T>,
}

impl<'a, T: Float> SkeletonBuilder<'a, T> {
    /// Creates a builder for system matrix `a` with diagonal `diag`
    ///
    /// `diag` is expected to equal the diagonal of `a`; this is not checked.
    pub fn new(
        a: &'a SparseMatrixCSC<T>,
        diag: ArrayView1<'a, T>,
        config: SkeletonConfig,
    ) -> Result<Self> {
        validate_system(a, &diag)?;
        validate_tolerance(config.tolerance)?;
        let threshold: T =
            NumCast::from(config.threshold()).ok_or(Error::InvalidTolerance(config.tolerance))?;
        let workspace = Workspace::new(a.n_rows, config.initial_basis_dim)?;

        Ok(Self {
            a,
            diag,
            config,
            threshold,
            workspace,
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    /// The builder's workspace, clean between calls
    pub fn workspace(&self) -> &Workspace<T> {
        &self.workspace
    }

    /// Builds the skeleton and weighted sum for right-hand sides `b`
    pub fn build(&mut self, b: &SparseMatrixCSC<T>, u: ArrayView1<T>) -> Result<InterpSkeleton<T>> {
        validate_rhs(self.a, b, &u)?;

        let (nf, nc) = (b.n_rows, b.n_cols);
        info!(
            "building skeleton: {} rows, {} columns, nnz(B) = {}, {:?} threshold {}",
            nf,
            nc,
            b.nnz(),
            self.config.stop_policy,
            self.config.threshold()
        );

        let nzmax = b.nnz() * self.config.skeleton_fill_factor;
        let mut skeleton = SkeletonMatrix::with_capacity(nf, nc, nzmax)?;
        let mut weighted_sum = Array1::from_elem(nf, T::zero());
        let mut columns = Vec::with_capacity(nc);

        for j in 0..nc {
            match self.build_column(j, b, u[j], &mut skeleton, &mut weighted_sum) {
                Ok(report) => columns.push(report),
                Err(err) => {
                    self.workspace.reset();
                    return Err(err);
                }
            }
        }
        skeleton.finalize();

        info!(
            "skeleton complete: nnz = {} ({:.2} per column)",
            skeleton.nnz(),
            skeleton.nnz() as f64 / nc.max(1) as f64
        );

        Ok(InterpSkeleton {
            skeleton,
            weighted_sum,
            columns,
        })
    }

    fn build_column(
        &mut self,
        j: usize,
        b: &SparseMatrixCSC<T>,
        uj: T,
        skeleton: &mut SkeletonMatrix,
        weighted_sum: &mut Array1<T>,
    ) -> Result<ColumnReport<T>> {
        let start = skeleton.begin_column();
        let mut report = ColumnReport::empty();

        let (b_rows, b_vals) = b.col(j);
        if b_rows.is_empty() {
            trace!("column {}: empty", j);
            return Ok(report);
        }

        let a = self.a;
        let ws = &mut self.workspace;
        ws.residual.load_sorted(b_rows, b_vals, &mut ws.dense);
        for &i in b_rows {
            ws.beta[i] = T::zero();
        }

        let mut k = 0;
        loop {
            let (pivot, norm) =
                select_pivot(&ws.residual, &self.diag, &ws.beta, self.config.stop_policy);
            report.final_norm = norm;
            if self.config.record_norm_history {
                report.norm_history.push(norm);
            }
            let pivot = match pivot {
                Some(p) if norm > self.threshold => p,
                _ => break,
            };
            let s = pivot.row;
            if !pivot.has_energy() {
                return Err(Error::NonPositiveEnergy {
                    column: j,
                    row: s,
                    energy: pivot.energy.to_f64().unwrap_or(f64::NAN),
                });
            }

            skeleton.push(s)?;
            ws.basis.ensure_dim(k + 1)?;
            ws.active[s] = Some(k);
            trace!("column {}: step {} selects row {}", j, k, s);

            // q_k = -(Q Q^T A e_s, -1) / sqrt(d_s - beta_s)
            let (a_rows, a_vals) = a.col(s);
            let qk = ws
                .basis
                .extend(k, a_rows, a_vals, &ws.active, pivot.energy, &mut ws.projection);

            // X e_j += w q_k
            let support = skeleton.tail(start);
            let scale = uj * pivot.weight;
            for (&row, &q) in support.iter().zip(qk) {
                weighted_sum[row] = weighted_sum[row] + scale * q;
            }

            // A q_k vanishes on earlier rows by A-orthogonality and on row s
            // the residual is zeroed, so the product skips every mapped row
            ws.product.len = masked_spmv(
                a,
                support,
                qk,
                &mut ws.product.idx,
                &mut ws.product.val,
                &mut ws.dense,
                &mut ws.seen,
                &ws.active,
            );

            ws.rotate_residual();
            ws.residual.len = residual_update(
                ws.previous.indices(),
                ws.previous.values(),
                pivot.weight,
                ws.product.indices(),
                ws.product.values(),
                &mut ws.residual.idx,
                &mut ws.residual.val,
                &mut ws.beta,
                &ws.active,
            );

            k += 1;
        }

        report.steps = k;
        heap_sort(skeleton.tail_mut(start));
        ws.release(skeleton.tail(start));
        trace!(
            "column {}: {} nonzeros, final statistic {}",
            j,
            k,
            report.final_norm.to_f64().unwrap_or(f64::NAN)
        );

        Ok(report)
    }
}

/// Computes the interpolation skeleton of `b` with respect to `a`
///
/// For each column `j` of B this greedily selects rows and coefficients
/// forming a sparse approximate minimizer `X e_j` of
/// `0.5 x^T A x - B_j^T x`, returning the selected pattern and
/// `sum_j u_j X e_j`.
///
/// # Arguments
///
/// * `a` - Symmetric positive definite matrix (n x n)
/// * `b` - Right-hand sides (n x nc)
/// * `d` - Diagonal of `a` (length n)
/// * `u` - Column weights (length nc)
/// * `config` - Tolerance and stopping policy
///
/// # Errors
///
/// Returns an error without computing anything if the shapes are
/// inconsistent or the tolerance is not a finite positive real, and
/// [`Error::NonPositiveEnergy`] if a row with nonzero residual has no energy
/// left, which a positive semidefinite `a` only produces for an
/// inconsistent right-hand side.
///
/// # Examples
///
/// ```
/// use interp_skel::{interp_skel, SkeletonConfig, SparseMatrixCSC};
/// use ndarray::arr1;
///
/// let a = SparseMatrixCSC::<f64>::identity(3);
/// let b = SparseMatrixCSC::new(3, 1, vec![0, 3], vec![0, 1, 2], vec![3.0, 1.0, 0.05]);
/// let d = arr1(&[1.0, 1.0, 1.0]);
/// let u = arr1(&[1.0]);
///
/// let out = interp_skel(&a, &b, d.view(), u.view(), &SkeletonConfig::with_tolerance(0.2)).unwrap();
/// assert_eq!(out.skeleton.col(0), &[0, 1]);
/// assert_eq!(out.weighted_sum.to_vec(), vec![3.0, 1.0, 0.0]);
/// ```
pub fn interp_skel<'a, T: Float>(
    a: &'a SparseMatrixCSC<T>,
    b: &SparseMatrixCSC<T>,
    d: ArrayView1<'a, T>,
    u: ArrayView1<T>,
    config: &SkeletonConfig,
) -> Result<InterpSkeleton<T>> {
    SkeletonBuilder::new(a, d, config.clone())?.build(b, u)
}
