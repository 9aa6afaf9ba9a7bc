//! `pdf-compare` library crate.
//!
//! Compares simulation PDFs (two-column `x y` tables) from two variants and
//! reports where they diverge around the reference peak.
//!
//! The binary (`pdfcmp`) is a thin wrapper around this library so that:
//!
//! - the numeric core is testable without spawning processes
//! - the sweep driver can be reused with a custom catalog

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
