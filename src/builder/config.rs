//! Configuration for the skeleton builder

use crate::constants::{
    DEFAULT_TOLERANCE, INITIAL_BASIS_DIM, SKELETON_FILL_FACTOR, THRESHOLD_SCALE,
};

/// Statistic used to decide when a column has enough nonzeros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopPolicy {
    /// Stop when every nonzero that could still be added would be small:
    /// `max_i |r_i / (d_i - beta_i)| <= tol^2 / 2`
    MaxNormalized,
    /// Stop when the candidate values sum to little:
    /// `sum_i |r_i / (d_i - beta_i)| <= tol / 2`
    #[default]
    SumNormalized,
}

impl StopPolicy {
    /// Threshold the stopping statistic is compared against
    pub fn threshold(&self, tol: f64) -> f64 {
        match self {
            StopPolicy::MaxNormalized => THRESHOLD_SCALE * tol * tol,
            StopPolicy::SumNormalized => THRESHOLD_SCALE * tol,
        }
    }

    /// Folds one candidate's normalized magnitude into the running statistic
    #[inline]
    pub(crate) fn fold<T: num_traits::Float>(&self, acc: T, candidate: T) -> T {
        match self {
            StopPolicy::MaxNormalized => acc.max(candidate),
            StopPolicy::SumNormalized => acc + candidate,
        }
    }
}

/// Configuration for building an interpolation skeleton
#[derive(Debug, Clone)]
pub struct SkeletonConfig {
    /// User tolerance controlling how many nonzeros are kept
    pub tolerance: f64,

    /// Stopping statistic and threshold scaling
    pub stop_policy: StopPolicy,

    /// Initial number of basis columns allocated before any doubling
    pub initial_basis_dim: usize,

    /// Initial skeleton capacity as a multiple of nnz(B)
    pub skeleton_fill_factor: usize,

    /// Whether to keep every column's sequence of stopping statistics
    pub record_norm_history: bool,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            stop_policy: StopPolicy::default(),
            initial_basis_dim: INITIAL_BASIS_DIM,
            skeleton_fill_factor: SKELETON_FILL_FACTOR,
            record_norm_history: false,
        }
    }
}

impl SkeletonConfig {
    /// Default configuration with the given tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Replaces the stopping policy
    pub fn with_stop_policy(mut self, stop_policy: StopPolicy) -> Self {
        self.stop_policy = stop_policy;
        self
    }

    /// Enables recording of per-step stopping statistics
    pub fn with_norm_history(mut self) -> Self {
        self.record_norm_history = true;
        self
    }

    /// Threshold implied by the tolerance and stopping policy
    pub fn threshold(&self) -> f64 {
        self.stop_policy.threshold(self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_sum() {
        let config = SkeletonConfig::default();
        assert_eq!(config.stop_policy, StopPolicy::SumNormalized);
        assert_eq!(config.initial_basis_dim, 35);
        assert_eq!(config.skeleton_fill_factor, 2);
    }

    #[test]
    fn test_thresholds() {
        let config = SkeletonConfig::with_tolerance(0.2);
        assert!((config.threshold() - 0.1).abs() < 1e-15);

        let config = config.with_stop_policy(StopPolicy::MaxNormalized);
        assert!((config.threshold() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_fold() {
        let sum = StopPolicy::SumNormalized.fold(1.0, 2.5);
        let max = StopPolicy::MaxNormalized.fold(1.0, 2.5);
        assert_eq!(sum, 3.5);
        assert_eq!(max, 2.5);
    }
}
