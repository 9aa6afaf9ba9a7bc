//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves configuration (flags, `.env`, catalog file)
//! - runs the comparison pipeline
//! - prints reports

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, PairArgs, SweepArgs, WidthArgs};
use crate::domain::{Catalog, Jacobian, PairConfig, PdfTable, SweepConfig, Variant};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable consulted when `--base-path` is absent.
pub const BASE_PATH_ENV: &str = "PDFCMP_BASE_PATH";
pub const DEFAULT_BASE_PATH: &str = "PDF";

/// Entry point for the `pdfcmp` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Sweep(args) => handle_sweep(args),
        Command::Pair(args) => handle_pair(args),
        Command::Width(args) => handle_width(args),
    }
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let strict = args.strict;
    let config = sweep_config_from_args(&args)?;
    let output = pipeline::run_sweep(&config);

    println!("{}", crate::report::format_sweep(&config, &output));

    if strict {
        strict_result(&output)?;
    }
    Ok(())
}

fn handle_pair(args: PairArgs) -> Result<(), AppError> {
    let config = pair_config_from_args(&args)?;
    println!("{}", pair_report(&config)?);
    Ok(())
}

fn handle_width(args: WidthArgs) -> Result<(), AppError> {
    println!("{}", width_report(&args)?);
    Ok(())
}

/// Under `--strict`, the first failed combination decides the exit code.
pub fn strict_result(output: &pipeline::SweepOutput) -> Result<(), AppError> {
    match output.failures().next() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

/// Compare the two files of `config` and render the `pair` report.
pub fn pair_report(config: &PairConfig) -> Result<String, AppError> {
    let log_axis = config.log_axis;
    let result = pipeline::compare_files(
        &config.reference,
        &config.other,
        |t| axis_jacobian(log_axis, t),
        config.threshold,
    )?;

    Ok(crate::report::format_pair(
        &config.reference.display().to_string(),
        &config.other.display().to_string(),
        &result,
        config.threshold,
    ))
}

/// Estimate the bandwidth of one file and render the `width` report line.
pub fn width_report(args: &WidthArgs) -> Result<String, AppError> {
    let table = crate::io::load_pdf(&args.pdf)?;
    let jacobian = axis_jacobian(args.log_axis, &table);
    let moments = crate::math::weighted_moments(&table, &jacobian)?;
    let bins = crate::math::width_in_bins(&table, &jacobian)?;
    let bandwidth = crate::math::bandwidth_from_bins(bins);

    Ok(crate::report::format_width(
        &args.pdf.display().to_string(),
        &moments,
        bins,
        bandwidth,
    ))
}

fn axis_jacobian(log_axis: bool, table: &PdfTable) -> Jacobian {
    if log_axis {
        Jacobian::log_axis(table)
    } else {
        Jacobian::Unit
    }
}

pub fn sweep_config_from_args(args: &SweepArgs) -> Result<SweepConfig, AppError> {
    let threshold = validate_threshold(args.threshold.value)?;

    let catalog = match &args.catalog {
        Some(path) => crate::io::read_catalog_json(path)?,
        None => Catalog::default(),
    };

    Ok(SweepConfig {
        base_path: resolve_base_path(args.base_path.clone()),
        box_id: args.box_id.clone(),
        resolution: args.resolution.clone(),
        threshold,
        catalog,
        jacobian: args.jacobian,
        reference: Variant(args.reference_variant.clone()),
        other: Variant(args.other_variant.clone()),
    })
}

pub fn pair_config_from_args(args: &PairArgs) -> Result<PairConfig, AppError> {
    Ok(PairConfig {
        reference: args.reference.clone(),
        other: args.other.clone(),
        threshold: validate_threshold(args.threshold.value)?,
        log_axis: args.log_axis,
    })
}

/// Flag, then `PDFCMP_BASE_PATH` (a `.env` file is honoured), then `PDF`.
pub fn resolve_base_path(flag: Option<PathBuf>) -> PathBuf {
    if flag.is_some() {
        return base_path_from(flag, None);
    }
    dotenvy::dotenv().ok();
    base_path_from(None, std::env::var_os(BASE_PATH_ENV))
}

/// Precedence rule behind [`resolve_base_path`], without touching the process environment.
pub fn base_path_from(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    flag.or_else(|| env.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_PATH))
}

/// Non-finite thresholds are rejected; values outside (0, 1) only warn.
pub fn validate_threshold(threshold: f64) -> Result<f64, AppError> {
    if !threshold.is_finite() {
        return Err(AppError::new(2, format!("Threshold must be finite, got {threshold}.")));
    }
    if threshold <= 0.0 || threshold >= 1.0 {
        log::warn!("threshold {threshold} is outside (0, 1); sensitivity changes accordingly");
    }
    Ok(threshold)
}
