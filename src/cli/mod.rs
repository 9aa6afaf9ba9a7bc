//! Command-line parsing for the PDF comparison tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numeric core and the sweep driver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::JacobianPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pdfcmp", version, about = "Compare dm/bao simulation PDFs around their peak")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep every category and redshift of one box and resolution.
    Sweep(SweepArgs),
    /// Compare two explicit PDF files.
    Pair(PairArgs),
    /// Print the estimated smoothing bandwidth of one PDF file.
    Width(WidthArgs),
}

/// Options for the full comparison sweep.
#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    /// Box identifier (directory under the base path), e.g. `Box3`.
    #[arg(short = 'b', long = "box")]
    pub box_id: String,

    /// Resolution string embedded in file names, e.g. `01.76_arcsec`.
    #[arg(short = 'r', long)]
    pub resolution: String,

    #[command(flatten)]
    pub threshold: ThresholdArg,

    /// Root directory of the PDF tree (falls back to `PDFCMP_BASE_PATH`, then `PDF`).
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// JSON catalog replacing the built-in categories and redshifts.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// How to pick the jacobian for bandwidth estimation.
    #[arg(long, value_enum, default_value_t = JacobianPolicy::Unit)]
    pub jacobian: JacobianPolicy,

    /// Variant tag of the reference PDFs (the peak is taken from these).
    #[arg(long, default_value = "dm")]
    pub reference_variant: String,

    /// Variant tag of the PDFs compared against the reference.
    #[arg(long, default_value = "bao")]
    pub other_variant: String,

    /// Exit non-zero if any combination failed.
    #[arg(long)]
    pub strict: bool,
}

/// Options for comparing two files directly.
#[derive(Debug, Parser, Clone)]
pub struct PairArgs {
    /// Reference PDF (its peak anchors the bracket).
    pub reference: PathBuf,

    /// PDF compared against the reference.
    pub other: PathBuf,

    #[command(flatten)]
    pub threshold: ThresholdArg,

    /// Apply a 1/x jacobian (x-axis is a log quantity).
    #[arg(long)]
    pub log_axis: bool,
}

/// Options for bandwidth estimation.
#[derive(Debug, Parser, Clone)]
pub struct WidthArgs {
    /// PDF file.
    pub pdf: PathBuf,

    /// Apply a 1/x jacobian (x-axis is a log quantity).
    #[arg(long)]
    pub log_axis: bool,
}

#[derive(Debug, Args, Clone, Copy)]
pub struct ThresholdArg {
    /// Relative-difference threshold, normally in (0, 1).
    #[arg(short = 't', long = "threshold", default_value_t = 0.5)]
    pub value: f64,
}
