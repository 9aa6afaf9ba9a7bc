//! Formatted terminal output for comparison results.
//!
//! We keep formatting code in one place so the pipeline stays free of print
//! statements and output changes are localized.

use crate::app::pipeline::{CombinationReport, Outcome, PairResult, SweepOutput};
use crate::domain::{Bracket, SweepConfig};
use crate::math::Moments;

/// `Box: Box3, Category: Shear, z2, Resolution: 01.76_arcsec`
pub fn format_sweep_header(config: &SweepConfig, report: &CombinationReport) -> String {
    format!(
        "Box: {}, Category: {}, z{}, Resolution: {}",
        config.box_id,
        report.combination.category.name,
        report.combination.redshift,
        config.resolution
    )
}

/// Status line plus, when a crossing exists, the bracket line.
pub fn format_bracket(bracket: &Bracket, threshold: f64) -> String {
    let pct = threshold * 100.0;
    if !bracket.has_crossing() {
        return format!("No values found near peak with relative difference < {pct:?}%");
    }
    format!(
        "First two values around the peak where relative difference < {pct:?}%:\n[{}, {}]",
        fmt_bound(bracket.low),
        fmt_bound(bracket.high)
    )
}

pub fn format_outcome(outcome: &Outcome, threshold: f64) -> String {
    match outcome {
        Outcome::Compared(result) => format_bracket(&result.divergence.bracket, threshold),
        Outcome::Failed(err) => format!("Error: {err}"),
    }
}

/// Every reported combination followed by a one-line summary.
pub fn format_sweep(config: &SweepConfig, output: &SweepOutput) -> String {
    let mut out = String::new();
    for report in &output.reports {
        out.push_str(&format_sweep_header(config, report));
        out.push('\n');
        out.push_str(&format_outcome(&report.outcome, config.threshold));
        out.push('\n');
    }
    out.push_str(&format!(
        "Compared {} pair(s), skipped {}, failed {}.",
        output.compared(),
        output.skipped,
        output.failures().count()
    ));
    out
}

pub fn format_pair(reference: &str, other: &str, result: &PairResult, threshold: f64) -> String {
    let mut out = format!("Reference: {reference}, Other: {other}\n");
    out.push_str(&format!(
        "Bandwidth: reference={} other={} | peak at x={}\n",
        result.reference.window,
        result.other.window,
        result.reference.table.x()[result.peak_index]
    ));
    out.push_str(&format_bracket(&result.divergence.bracket, threshold));
    out
}

pub fn format_width(path: &str, moments: &Moments, bins: i64, bandwidth: i64) -> String {
    format!(
        "{path}: mean={:.6} std={:.6} | one-sigma width={bins} bins | bandwidth={bandwidth}",
        moments.mean, moments.std
    )
}

fn fmt_bound(v: f64) -> String {
    if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else {
        format!("{v}")
    }
}
