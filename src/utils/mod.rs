//! Utility functions and helpers

pub mod formats;

pub use formats::{csc_from_dense, csc_to_dense, from_sprs_csc, skeleton_to_sprs, to_sprs_csc};
