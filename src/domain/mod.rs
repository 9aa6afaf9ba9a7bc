//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - PDF tables and jacobians (`PdfTable`, `Jacobian`, `JacobianPolicy`)
//! - analyzer outputs (`Bracket`, `Divergence`)
//! - sweep configuration (`Catalog`, `Category`, `SweepConfig`, `PairConfig`)

pub mod types;

pub use types::*;
