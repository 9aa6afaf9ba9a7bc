//! Input helpers.
//!
//! - PDF text ingest (`ingest`)
//! - catalog JSON read (`catalog`)

pub mod catalog;
pub mod ingest;

pub use catalog::*;
pub use ingest::*;
