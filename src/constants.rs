//! Centralized constants for the interp-skel library
//!
//! Capacity guesses and defaults used by the skeleton builder. New tunables
//! should be added here rather than scattered through the code.

// ============================================================================
// STORAGE GROWTH
// ============================================================================

/// First guess for the largest support of any output column.
///
/// The packed basis is allocated for this many columns and doubled
/// whenever a column needs more.
pub const INITIAL_BASIS_DIM: usize = 35;

/// Initial skeleton capacity as a multiple of nnz(B)
pub const SKELETON_FILL_FACTOR: usize = 2;

/// Multiplier applied to a buffer capacity when it is exhausted
pub const GROWTH_FACTOR: usize = 2;

// ============================================================================
// STOPPING TEST
// ============================================================================

/// Default user tolerance
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Scale applied to `tol` (policy 2) or `tol^2` (policy 1) to form the threshold
pub const THRESHOLD_SCALE: f64 = 0.5;

