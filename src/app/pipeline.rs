//! Shared comparison pipeline used by the `sweep` and `pair` commands.
//!
//! Per pair of PDFs:
//! load -> bandwidth -> smooth -> peak (reference) -> relative difference -> bracket
//!
//! The sweep walks the catalog, skips combinations whose files are absent, and
//! records per-combination failures without stopping.

use std::path::Path;

use crate::domain::{Category, Divergence, Jacobian, PdfTable, SweepConfig};
use crate::error::PdfError;
use crate::io::load_pdf;
use crate::math::{analyze, estimate_width, find_peak, smooth_table, smoothing_window};

/// A PDF after bandwidth estimation and smoothing.
#[derive(Debug, Clone)]
pub struct SmoothedPdf {
    pub table: PdfTable,
    /// Bandwidth as estimated (may be < 1).
    pub bandwidth: i64,
    /// Window actually applied (bandwidth clamped to >= 1).
    pub window: i64,
}

/// All computed outputs for one pair of PDFs.
#[derive(Debug, Clone)]
pub struct PairResult {
    pub reference: SmoothedPdf,
    pub other: SmoothedPdf,
    pub peak_index: usize,
    pub divergence: Divergence,
}

/// Estimate the bandwidth of `table` and smooth it.
pub fn prepare(table: PdfTable, jacobian: &Jacobian) -> Result<SmoothedPdf, PdfError> {
    let bandwidth = estimate_width(&table, jacobian)?;
    let window = smoothing_window(bandwidth);
    if window != bandwidth {
        log::warn!("bandwidth {bandwidth} is below 1 bin; smoothing with a window of {window}");
    }
    let table = smooth_table(table, window)?;
    Ok(SmoothedPdf {
        table,
        bandwidth,
        window,
    })
}

/// Run the core pipeline on two in-memory tables.
pub fn compare_tables<J>(
    reference: PdfTable,
    other: PdfTable,
    jacobian: J,
    threshold: f64,
) -> Result<PairResult, PdfError>
where
    J: Fn(&PdfTable) -> Jacobian,
{
    let ref_jac = jacobian(&reference);
    let reference = prepare(reference, &ref_jac)?;
    let other_jac = jacobian(&other);
    let other = prepare(other, &other_jac)?;

    let peak_index = find_peak(&reference.table)?;
    log::debug!(
        "bandwidths: reference={} other={}; peak at row {peak_index}",
        reference.bandwidth,
        other.bandwidth
    );

    let divergence = analyze(&reference.table, &other.table, peak_index, threshold)?;
    log::debug!("{} bin(s) above threshold {threshold}", divergence.crossings.len());

    Ok(PairResult {
        reference,
        other,
        peak_index,
        divergence,
    })
}

/// Load two PDF files and compare them.
pub fn compare_files<J>(
    reference: &Path,
    other: &Path,
    jacobian: J,
    threshold: f64,
) -> Result<PairResult, PdfError>
where
    J: Fn(&PdfTable) -> Jacobian,
{
    let reference = load_pdf(reference)?;
    let other = load_pdf(other)?;
    compare_tables(reference, other, jacobian, threshold)
}

/// One (category, redshift) cell of the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub category: Category,
    pub redshift: u32,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Compared(Box<PairResult>),
    Failed(PdfError),
}

#[derive(Debug, Clone)]
pub struct CombinationReport {
    pub combination: Combination,
    pub outcome: Outcome,
}

/// Everything a sweep produced, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct SweepOutput {
    pub reports: Vec<CombinationReport>,
    pub skipped: usize,
}

impl SweepOutput {
    pub fn compared(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Compared(_)))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PdfError> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed(err) => Some(err),
            Outcome::Compared(_) => None,
        })
    }
}

/// Walk every category and redshift in the catalog.
pub fn run_sweep(config: &SweepConfig) -> SweepOutput {
    let mut output = SweepOutput::default();

    for category in &config.catalog.categories {
        for &redshift in &config.catalog.redshifts {
            let ref_path = config.pdf_path(category, &config.reference, redshift);
            let other_path = config.pdf_path(category, &config.other, redshift);

            if !(ref_path.exists() && other_path.exists()) {
                log::debug!(
                    "skipping {} z{redshift}: '{}' or '{}' not found",
                    category.name,
                    ref_path.display(),
                    other_path.display()
                );
                output.skipped += 1;
                continue;
            }

            let policy = config.jacobian;
            let variable = category.variable.as_str();
            let outcome = match compare_files(
                &ref_path,
                &other_path,
                |t| policy.jacobian_for(variable, t),
                config.threshold,
            ) {
                Ok(result) => Outcome::Compared(Box::new(result)),
                Err(err) => {
                    log::error!("{} z{redshift}: {err}", category.name);
                    Outcome::Failed(err)
                }
            };

            output.reports.push(CombinationReport {
                combination: Combination {
                    category: category.clone(),
                    redshift,
                },
                outcome,
            });
        }
    }

    log::info!(
        "sweep finished: {} compared, {} skipped, {} failed",
        output.compared(),
        output.skipped,
        output.failures().count()
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn gaussian(n: usize, center: f64, sigma: f64, noise: f64, seed: u64) -> PdfTable {
        let mut rng = StdRng::seed_from_u64(seed);
        let jitter = Normal::new(0.0, noise).unwrap();
        let rows: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let x = i as f64 * 0.05;
                let y = (-(x - center).powi(2) / (2.0 * sigma * sigma)).exp();
                (x, (y + jitter.sample(&mut rng)).max(0.0))
            })
            .collect();
        PdfTable::from_rows(&rows)
    }

    #[test]
    fn identical_pdfs_have_open_bracket() {
        let a = gaussian(200, 5.0, 1.0, 0.01, 1);
        let result = compare_tables(a.clone(), a, |_| Jacobian::Unit, 0.5).unwrap();
        assert!(result.divergence.crossings.is_empty());
        assert_eq!(result.divergence.bracket.low, f64::NEG_INFINITY);
        assert_eq!(result.divergence.bracket.high, f64::INFINITY);
    }

    #[test]
    fn shifted_pdf_brackets_the_peak() {
        let a = gaussian(200, 5.0, 1.0, 0.005, 2);
        let b = gaussian(200, 5.4, 1.0, 0.005, 3);
        let result = compare_tables(a, b, |_| Jacobian::Unit, 0.5).unwrap();

        let peak_x = result.reference.table.x()[result.peak_index];
        let bracket = result.divergence.bracket;
        assert!((peak_x - 5.0).abs() < 0.3, "peak at {peak_x}");
        assert!(bracket.low < peak_x && peak_x < bracket.high);
        assert!(bracket.low.is_finite() && bracket.high.is_finite());
    }

    #[test]
    fn narrow_pdf_clamps_window() {
        // One-sigma width well under 10 bins gives a zero bandwidth.
        let table = PdfTable::from_rows(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 3.0),
            (3.0, 1.0),
            (4.0, 0.0),
        ]);
        let prepared = prepare(table.clone(), &Jacobian::Unit).unwrap();
        assert_eq!(prepared.bandwidth, 0);
        assert_eq!(prepared.window, 1);
        assert_eq!(prepared.table, table);
    }

    #[test]
    fn zero_density_surfaces_domain_error() {
        let zeros = PdfTable::from_rows(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let ok = PdfTable::from_rows(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let err = compare_tables(zeros, ok, |_| Jacobian::Unit, 0.5).unwrap_err();
        assert!(matches!(err, PdfError::Domain(_)));
    }
}
