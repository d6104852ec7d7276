//! Packed upper-triangular A-orthonormal basis
//!
//! For one output column the builder selects rows `s_0, s_1, ...` and keeps
//! an upper-triangular `Q` whose columns are A-orthonormal in the coordinate
//! system of the selected rows. Column `c` has `c + 1` entries and is stored
//! contiguously at offset `c (c + 1) / 2`, so extending `Q` by one column
//! never moves the columns before it.

use log::debug;
use num_traits::Float;

use crate::constants::GROWTH_FACTOR;
use crate::error::{Error, Result};

/// Offset of column `col` in packed storage
#[inline]
pub fn packed_offset(col: usize) -> usize {
    col * (col + 1) / 2
}

/// Number of stored entries for a `dim` x `dim` upper-triangular matrix
#[inline]
pub fn packed_len(dim: usize) -> usize {
    packed_offset(dim)
}

/// Scatters a sparse column into the coordinates of the selected rows
///
/// `dense[p]` receives the value of the row mapped to position `p` by
/// `active`; positions at or beyond `dense.len()` and unmapped rows are
/// ignored. Row indices may be unsorted but must be unique.
pub fn restrict_unsorted<T: Float>(dense: &mut [T], active: &[Option<usize>], rows: &[usize], vals: &[T]) {
    dense.iter_mut().for_each(|d| *d = T::zero());
    for (&i, &v) in rows.iter().zip(vals) {
        if let Some(p) = active[i] {
            if p < dense.len() {
                dense[p] = v;
            }
        }
    }
}

/// `y = U^T x` for the leading `x.len()` x `x.len()` block of packed `U`
pub fn mul_upper_transpose<T: Float>(packed: &[T], x: &[T], y: &mut [T]) {
    let k = x.len();
    for (c, yc) in y[..k].iter_mut().enumerate() {
        let col = &packed[packed_offset(c)..packed_offset(c) + c + 1];
        *yc = col
            .iter()
            .zip(&x[..=c])
            .fold(T::zero(), |acc, (&u, &xr)| acc + u * xr);
    }
}

/// `y = U x` for the leading `x.len()` x `x.len()` block of packed `U`
pub fn mul_upper<T: Float>(packed: &[T], x: &[T], y: &mut [T]) {
    let k = x.len();
    y[..k].iter_mut().for_each(|v| *v = T::zero());
    for (c, &xc) in x.iter().enumerate() {
        let col = &packed[packed_offset(c)..packed_offset(c) + c + 1];
        for (yr, &u) in y[..=c].iter_mut().zip(col) {
            *yr = *yr + u * xc;
        }
    }
}

/// Growable packed storage for the basis of the column being built
#[derive(Debug, Clone)]
pub struct TriangularBasis<T> {
    data: Vec<T>,
    max_dim: usize,
}

impl<T: Float> TriangularBasis<T> {
    /// Allocates storage for a basis of up to `dim` columns
    pub fn with_dim(dim: usize) -> Result<Self> {
        let mut basis = Self {
            data: Vec::new(),
            max_dim: 0,
        };
        basis.resize_to(dim.max(1))?;
        Ok(basis)
    }

    /// Number of columns the current storage can hold
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Makes room for `dim` columns, doubling the capacity as often as needed
    pub fn ensure_dim(&mut self, dim: usize) -> Result<()> {
        if dim <= self.max_dim {
            return Ok(());
        }
        let mut grown = self.max_dim;
        while grown < dim {
            grown *= GROWTH_FACTOR;
        }
        debug!("basis storage grown from {} to {} columns", self.max_dim, grown);
        self.resize_to(grown)
    }

    fn resize_to(&mut self, dim: usize) -> Result<()> {
        let len = packed_len(dim);
        self.data
            .try_reserve_exact(len.saturating_sub(self.data.len()))
            .map_err(|_| Error::OutOfMemory {
                size: len * std::mem::size_of::<T>(),
            })?;
        self.data.resize(len, T::zero());
        self.max_dim = dim;
        Ok(())
    }

    /// Column `c` of the basis (`c + 1` entries)
    pub fn column(&self, c: usize) -> &[T] {
        &self.data[packed_offset(c)..packed_offset(c) + c + 1]
    }

    /// Entry `(r, c)`; zero below the diagonal
    pub fn get(&self, r: usize, c: usize) -> T {
        if r > c {
            T::zero()
        } else {
            self.data[packed_offset(c) + r]
        }
    }

    /// `y = Q_k^T x` over the first `x.len()` columns
    pub fn mul_transpose(&self, x: &[T], y: &mut [T]) {
        mul_upper_transpose(&self.data, x, y);
    }

    /// `y = Q_k x` over the first `x.len()` columns
    pub fn mul(&self, x: &[T], y: &mut [T]) {
        mul_upper(&self.data, x, y);
    }

    /// Writes column `k` for the row just mapped to position `k`
    ///
    /// With `a_rows` / `a_vals` the matrix column of the new row and
    /// `energy = diag(A)[s] - beta[s]`, the new column is
    /// `-(Q Q^T A e_s, -1) / sqrt(energy)`: positive on the new row,
    /// minus the scaled projection on the earlier ones. `scratch` must hold
    /// at least `k` entries. The caller guarantees `energy > 0` and that
    /// storage for `k + 1` columns exists.
    pub fn extend(
        &mut self,
        k: usize,
        a_rows: &[usize],
        a_vals: &[T],
        active: &[Option<usize>],
        energy: T,
        scratch: &mut [T],
    ) -> &[T] {
        debug_assert!(k < self.max_dim);
        let (lead, rest) = self.data.split_at_mut(packed_offset(k));
        let qk = &mut rest[..=k];
        let proj = &mut scratch[..k];

        // Q Q^T A e_s, using the first k entries of the new column as input
        restrict_unsorted(&mut qk[..k], active, a_rows, a_vals);
        mul_upper_transpose(lead, &qk[..k], proj);
        mul_upper(lead, proj, &mut qk[..k]);

        let scale = -T::one() / energy.sqrt();
        for q in &mut qk[..k] {
            *q = *q * scale;
        }
        qk[k] = -scale;
        qk
    }
}
