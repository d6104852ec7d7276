//! Sparse residual update `r = x - alpha * y` with energy bookkeeping

use num_traits::Float;
use std::cmp::Ordering;

/// Appends `(row, value)` to the output unless the row is masked
#[inline]
fn emit<T: Copy>(
    r_idx: &mut [usize],
    r_val: &mut [T],
    len: &mut usize,
    mask: &[Option<usize>],
    row: usize,
    value: T,
) {
    if mask[row].is_none() {
        r_idx[*len] = row;
        r_val[*len] = value;
        *len += 1;
    }
}

/// Sets `r := x - alpha * y` over unmasked rows and folds `y .* y` into `beta`
///
/// `x` and `y` must both have strictly ascending indices; the output is
/// ascending as well. Every row present in `y` updates `beta`, masked or
/// not: rows also present in `x` accumulate `y_i^2`, rows only in `y` are
/// assigned `y_i^2` (their `beta` has no earlier contribution this column).
///
/// # Returns
///
/// The number of entries written to `r_idx` / `r_val`.
#[allow(clippy::too_many_arguments)]
pub fn residual_update<T>(
    x_idx: &[usize],
    x_val: &[T],
    alpha: T,
    y_idx: &[usize],
    y_val: &[T],
    r_idx: &mut [usize],
    r_val: &mut [T],
    beta: &mut [T],
    mask: &[Option<usize>],
) -> usize
where
    T: Float,
{
    debug_assert_eq!(x_idx.len(), x_val.len());
    debug_assert_eq!(y_idx.len(), y_val.len());

    let (mut px, mut py, mut len) = (0, 0, 0);
    while px < x_idx.len() && py < y_idx.len() {
        let (ix, iy) = (x_idx[px], y_idx[py]);
        match ix.cmp(&iy) {
            Ordering::Less => {
                emit(r_idx, r_val, &mut len, mask, ix, x_val[px]);
                px += 1;
            }
            Ordering::Greater => {
                let y = y_val[py];
                beta[iy] = y * y;
                emit(r_idx, r_val, &mut len, mask, iy, -alpha * y);
                py += 1;
            }
            Ordering::Equal => {
                let y = y_val[py];
                beta[iy] = beta[iy] + y * y;
                emit(r_idx, r_val, &mut len, mask, iy, x_val[px] - alpha * y);
                px += 1;
                py += 1;
            }
        }
    }

    for (&ix, &x) in x_idx[px..].iter().zip(&x_val[px..]) {
        emit(r_idx, r_val, &mut len, mask, ix, x);
    }
    for (&iy, &y) in y_idx[py..].iter().zip(&y_val[py..]) {
        beta[iy] = y * y;
        emit(r_idx, r_val, &mut len, mask, iy, -alpha * y);
    }

    len
}
