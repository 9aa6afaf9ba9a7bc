//! Reporting utilities: human-readable output for sweeps, pairs, and bandwidths.

pub mod format;

pub use format::*;
