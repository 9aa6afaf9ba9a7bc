//! Numeric core: bandwidth estimation, smoothing, peak search, divergence.

pub mod divergence;
pub mod moments;
pub mod peak;
pub mod smooth;

pub use divergence::*;
pub use moments::*;
pub use peak::*;
pub use smooth::*;
